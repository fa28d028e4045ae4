use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sarthi_ai::{
    AiError, AnalysisResult, BulkFailure, BulkStage, GeneratedInvoice, InvoiceSuggestions,
    LineItem, OrderAnalysisReport, PricingSummary, TaxLine,
};
use sarthi_core::{InvoiceId, OrderId};
use sarthi_invoicing::InvoiceStats;

/// Fractions internally, percentages on the wire.
fn percent(rate: f64) -> f64 {
    rate * 100.0
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GenerateInvoiceRequest {
    pub save_to_db: bool,
    pub auto_calculate: bool,
}

impl Default for GenerateInvoiceRequest {
    fn default() -> Self {
        Self {
            save_to_db: true,
            auto_calculate: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkGenerateRequest {
    pub order_ids: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub save_to_db: bool,
    #[serde(default = "default_true")]
    pub auto_calculate: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SmartPricingRequest {
    pub items: Option<Vec<PricingItemRequest>>,
}

/// Caller-supplied line item; omitted fields take the shop defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PricingItemRequest {
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    /// Fraction, e.g. `0.18`.
    pub tax_rate: f64,
}

impl Default for PricingItemRequest {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: 1,
            unit_price: 0.0,
            total_price: 0.0,
            tax_rate: sarthi_ai::config::STANDARD_TAX_RATE,
        }
    }
}

impl PricingItemRequest {
    pub fn into_line_item(self) -> Result<LineItem, AiError> {
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| AiError::invalid_input("line item quantity must be at least 1"))?;
        LineItem::validated(
            self.description,
            quantity,
            self.unit_price,
            self.total_price,
            self.tax_rate,
        )
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LineItemView {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    /// Percentage.
    pub tax_rate: f64,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            tax_rate: percent(item.tax_rate),
        }
    }
}

fn item_views(items: &[LineItem]) -> Vec<LineItemView> {
    items.iter().map(LineItemView::from).collect()
}

#[derive(Debug, Serialize)]
pub struct GeneratedInvoiceView {
    pub invoice_number: String,
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_address: String,
    pub items: Vec<LineItemView>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub due_date: DateTime<Utc>,
    pub notes: String,
}

impl From<&GeneratedInvoice> for GeneratedInvoiceView {
    fn from(invoice: &GeneratedInvoice) -> Self {
        Self {
            invoice_number: invoice.invoice_number.clone(),
            order_id: invoice.order_id,
            customer_name: invoice.customer_name.clone(),
            customer_address: invoice.customer_address.clone(),
            items: item_views(&invoice.items),
            subtotal: invoice.subtotal,
            tax_amount: invoice.tax_amount,
            total_amount: invoice.total_amount,
            due_date: invoice.due_date,
            notes: invoice.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub error: &'static str,
    pub message: String,
}

impl From<&AiError> for ErrorView {
    fn from(err: &AiError) -> Self {
        Self {
            error: err.code(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateInvoiceResponse {
    pub generated_invoice: GeneratedInvoiceView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_invoice_id: Option<InvoiceId>,
    /// Present when saving was requested and failed; the draft is still returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_error: Option<ErrorView>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BulkInvoiceView {
    pub order_id: OrderId,
    pub invoice_number: String,
    pub total_amount: f64,
    pub customer_name: String,
}

#[derive(Debug, Serialize)]
pub struct BulkFailureView {
    /// Echoes the requested id, which may not be a valid order id.
    pub order_id: String,
    pub stage: BulkStage,
    pub error: &'static str,
    pub message: String,
}

impl BulkFailureView {
    /// An id that could not be parsed never reaches generation.
    pub fn unparsable(raw: &str) -> Self {
        Self {
            order_id: raw.to_string(),
            stage: BulkStage::Generate,
            error: "invalid_input",
            message: format!("invalid order id: {raw}"),
        }
    }
}

impl From<&BulkFailure> for BulkFailureView {
    fn from(failure: &BulkFailure) -> Self {
        Self {
            order_id: failure.order_id.to_string(),
            stage: failure.stage,
            error: failure.error.code(),
            message: failure.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkGenerateResponse {
    pub generated_count: usize,
    pub saved_count: usize,
    pub generated_invoices: Vec<BulkInvoiceView>,
    pub failures: Vec<BulkFailureView>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsView {
    pub order_id: OrderId,
    pub analysis: AnalysisResult,
    pub suggested_items: Vec<LineItemView>,
    pub estimated_total: f64,
    pub notes: String,
}

impl From<&InvoiceSuggestions> for SuggestionsView {
    fn from(s: &InvoiceSuggestions) -> Self {
        Self {
            order_id: s.order_id,
            analysis: s.analysis.clone(),
            suggested_items: item_views(&s.suggested_items),
            estimated_total: s.estimated_total,
            notes: s.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SplitView {
    pub material_percentage: f64,
    pub labor_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsView {
    pub estimated_completion_hours: f64,
    pub complexity_level: String,
    pub suggested_tax_rate: f64,
    pub material_labor_split: SplitView,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeOrderResponse {
    pub order_id: OrderId,
    pub analysis: AnalysisResult,
    pub description: String,
    pub recommendations: RecommendationsView,
    pub message: &'static str,
}

impl From<OrderAnalysisReport> for AnalyzeOrderResponse {
    fn from(report: OrderAnalysisReport) -> Self {
        let a = &report.analysis;
        let recommendations = RecommendationsView {
            estimated_completion_hours: a.estimated_hours,
            complexity_level: a.complexity.as_str().to_string(),
            suggested_tax_rate: percent(a.tax_rate),
            material_labor_split: SplitView {
                material_percentage: percent(a.material_cost_ratio),
                labor_percentage: percent(a.labor_cost_ratio),
            },
        };
        Self {
            order_id: report.order_id,
            analysis: report.analysis,
            description: report.description,
            recommendations,
            message: "Order analysis completed successfully",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaxLineView {
    pub description: String,
    pub tax_rate: f64,
    pub tax_amount: f64,
}

impl From<TaxLine> for TaxLineView {
    fn from(line: TaxLine) -> Self {
        Self {
            description: line.description,
            tax_rate: percent(line.tax_rate),
            tax_amount: line.tax_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PricingView {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub tax_breakdown: Vec<TaxLineView>,
}

impl PricingView {
    pub fn new(summary: PricingSummary, breakdown: Vec<TaxLine>) -> Self {
        Self {
            subtotal: summary.subtotal,
            tax_amount: summary.tax_amount,
            total_amount: summary.total_amount,
            tax_breakdown: breakdown.into_iter().map(TaxLineView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsView {
    pub total_ai_invoices: usize,
    pub total_ai_amount: f64,
    pub average_amount: f64,
    pub status_breakdown: std::collections::BTreeMap<sarthi_invoicing::InvoiceStatus, usize>,
}

impl From<InvoiceStats> for StatsView {
    fn from(stats: InvoiceStats) -> Self {
        Self {
            total_ai_invoices: stats.invoice_count,
            total_ai_amount: stats.total_amount,
            average_amount: stats.average_amount,
            status_breakdown: stats.status_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_tax_rate_is_a_percentage_on_the_wire() {
        let view = LineItemView::from(&LineItem::single("Alteration Services", 250.0, 0.18));
        assert!((view.tax_rate - 18.0).abs() < 1e-9);
    }

    #[test]
    fn unparsable_bulk_id_is_echoed_back() {
        let view = BulkFailureView::unparsable("order-7");
        assert_eq!(view.order_id, "order-7");
        assert_eq!(view.stage, BulkStage::Generate);
        assert_eq!(view.error, "invalid_input");
    }

    #[test]
    fn pricing_item_defaults() {
        let item: PricingItemRequest = serde_json::from_str(r#"{"total_price": 100}"#).unwrap();
        let line = item.into_line_item().unwrap();
        assert_eq!(line.quantity, 1);
        assert!((line.tax_rate - 0.18).abs() < 1e-12);
    }

    #[test]
    fn negative_quantity_is_invalid() {
        let item: PricingItemRequest = serde_json::from_str(r#"{"quantity": -2}"#).unwrap();
        assert!(matches!(item.into_line_item(), Err(AiError::InvalidInput(_))));
    }

    #[test]
    fn generate_request_defaults_to_saving_with_auto_pricing() {
        let req: GenerateInvoiceRequest = serde_json::from_str("{}").unwrap();
        assert!(req.save_to_db && req.auto_calculate);
    }
}
