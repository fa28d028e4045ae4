//! Invoice assembly: the pipeline from an order id to a draft invoice, and the
//! separate step that persists a draft.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use sarthi_core::{CustomerId, OrderId, ValueObject};
use sarthi_invoicing::{InvoiceRecord, InvoiceStats, InvoiceStatus, InvoiceStore, NewInvoice};
use sarthi_orders::{Customer, CustomerStore, Order, OrderStore};

use crate::analyzer::{AnalysisResult, OrderAnalyzer};
use crate::config::{GeneratorConfig, InvoiceTerms};
use crate::description::describe_order;
use crate::error::AiError;
use crate::line_items::{LineItem, LineItemGenerator};
use crate::notes::NoteComposer;
use crate::numbering::InvoiceNumbering;
use crate::pricing::{self, PricingMode, PricingSummary};

/// Request to generate an invoice for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateInvoice {
    pub order_id: OrderId,
    pub mode: PricingMode,
    /// Generation time: drives the invoice number date, due date and
    /// delivery countdown.
    pub occurred_at: DateTime<Utc>,
}

impl GenerateInvoice {
    pub fn new(order_id: OrderId, mode: PricingMode, occurred_at: DateTime<Utc>) -> Self {
        Self {
            order_id,
            mode,
            occurred_at,
        }
    }
}

/// Draft invoice. Built once per generation and never mutated; either shown as
/// a preview or handed to [`InvoiceGenerator::persist`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInvoice {
    pub invoice_number: String,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_address: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub due_date: DateTime<Utc>,
    pub notes: String,
    pub analysis: AnalysisResult,
}

impl ValueObject for GeneratedInvoice {}

impl GeneratedInvoice {
    /// Pending invoice record linked to the draft's order and customer.
    pub fn to_new_invoice(&self) -> NewInvoice {
        NewInvoice {
            invoice_number: self.invoice_number.clone(),
            order_id: self.order_id,
            customer_id: self.customer_id,
            amount: self.subtotal,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            status: InvoiceStatus::Pending,
            due_date: Some(self.due_date.date_naive()),
            notes: self.notes.clone(),
        }
    }
}

/// Read-only preview of what an invoice for an order would contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSuggestions {
    pub order_id: OrderId,
    pub analysis: AnalysisResult,
    pub suggested_items: Vec<LineItem>,
    /// Σ item totals (pre-tax).
    pub estimated_total: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAnalysisReport {
    pub order_id: OrderId,
    pub analysis: AnalysisResult,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkStage {
    Generate,
    Persist,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkFailure {
    pub order_id: OrderId,
    pub stage: BulkStage,
    pub error: AiError,
}

/// Result of a bulk run. `generated` keeps input order and holds only
/// successes; every id that failed appears in `failures` with its reason.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkOutcome {
    pub generated: Vec<GeneratedInvoice>,
    pub saved: Vec<InvoiceRecord>,
    pub failures: Vec<BulkFailure>,
}

/// Orchestrates analysis, line items, pricing and notes over the stores.
pub struct InvoiceGenerator<O, C, I> {
    orders: O,
    customers: C,
    invoices: I,
    analyzer: OrderAnalyzer,
    line_items: LineItemGenerator,
    notes: NoteComposer,
    numbering: InvoiceNumbering,
    terms: InvoiceTerms,
}

impl<O, C, I> InvoiceGenerator<O, C, I>
where
    O: OrderStore,
    C: CustomerStore,
    I: InvoiceStore,
{
    pub fn new(orders: O, customers: C, invoices: I, config: GeneratorConfig) -> Self {
        let GeneratorConfig {
            analyzer,
            line_items,
            terms,
        } = config;

        Self {
            orders,
            customers,
            invoices,
            analyzer: OrderAnalyzer::new(analyzer),
            line_items: LineItemGenerator::new(line_items),
            notes: NoteComposer::new(terms.payment_terms_note.clone()),
            numbering: InvoiceNumbering::new(terms.number_prefix.clone()),
            terms,
        }
    }

    pub fn analyzer(&self) -> &OrderAnalyzer {
        &self.analyzer
    }

    pub fn numbering(&self) -> &InvoiceNumbering {
        &self.numbering
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Order, AiError> {
        self.orders
            .get(order_id)
            .await?
            .ok_or(AiError::OrderNotFound(order_id))
    }

    async fn load_customer(&self, customer_id: CustomerId) -> Result<Customer, AiError> {
        self.customers
            .get(customer_id)
            .await?
            .ok_or(AiError::CustomerNotFound(customer_id))
    }

    /// Pure pipeline over already-loaded records.
    pub fn draft(
        &self,
        order: &Order,
        customer: &Customer,
        mode: PricingMode,
        occurred_at: DateTime<Utc>,
    ) -> Result<GeneratedInvoice, AiError> {
        let analysis = self.analyzer.analyze(order);
        tracing::debug!(
            order_id = %order.id,
            complexity = %analysis.complexity,
            tax_rate = analysis.tax_rate,
            estimated_hours = analysis.estimated_hours,
            matched = ?analysis.matched_keywords,
            "order analyzed"
        );

        let mut items = self.line_items.generate(order, &analysis)?;
        let PricingSummary {
            subtotal,
            tax_amount,
            total_amount,
        } = match mode {
            PricingMode::Auto => pricing::calculate(&items),
            PricingMode::Manual => pricing::rebalance_to_order_value(
                &mut items,
                order.order_value,
                self.terms.manual_tax_rate,
            )?,
        };

        let due_date = TimeDelta::try_days(self.terms.payment_terms_days)
            .and_then(|terms| occurred_at.checked_add_signed(terms))
            .ok_or_else(|| {
                AiError::invalid_input(format!(
                    "payment terms of {} days give no representable due date",
                    self.terms.payment_terms_days
                ))
            })?;
        let notes = self.notes.compose(order, &analysis, occurred_at.date_naive());

        Ok(GeneratedInvoice {
            invoice_number: self.numbering.next(occurred_at),
            order_id: order.id,
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            customer_address: customer.formatted_address(),
            items,
            subtotal,
            tax_amount,
            total_amount,
            due_date,
            notes,
            analysis,
        })
    }

    /// Build a draft invoice for an order. Nothing is written.
    pub async fn generate(&self, cmd: &GenerateInvoice) -> Result<GeneratedInvoice, AiError> {
        let order = self.load_order(cmd.order_id).await?;
        let customer = self.load_customer(order.customer_id).await?;

        let invoice = self.draft(&order, &customer, cmd.mode, cmd.occurred_at)?;
        tracing::info!(
            order_id = %cmd.order_id,
            invoice_number = %invoice.invoice_number,
            mode = ?cmd.mode,
            items = invoice.items.len(),
            total_amount = invoice.total_amount,
            "generated invoice draft"
        );
        Ok(invoice)
    }

    /// Write a draft as one pending invoice record.
    pub async fn persist(&self, invoice: &GeneratedInvoice) -> Result<InvoiceRecord, AiError> {
        let new_invoice = invoice.to_new_invoice();
        new_invoice.validate()?;

        match self.invoices.create(new_invoice).await {
            Ok(record) => {
                tracing::info!(
                    invoice_id = %record.id,
                    invoice_number = %record.invoice_number,
                    order_id = %record.order_id,
                    "saved generated invoice"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    invoice_number = %invoice.invoice_number,
                    order_id = %invoice.order_id,
                    error = %e,
                    "failed to save generated invoice"
                );
                Err(e.into())
            }
        }
    }

    /// Reject orders that already carry an invoice.
    pub async fn ensure_not_invoiced(&self, order_id: OrderId) -> Result<(), AiError> {
        match self.invoices.find_by_order(order_id).await? {
            Some(existing) => Err(AiError::InvoiceExists {
                order_id,
                invoice_number: existing.invoice_number,
            }),
            None => Ok(()),
        }
    }

    /// Generate (and optionally save) invoices for several orders, sequentially.
    ///
    /// Each id is independent: a failure is recorded and the run continues.
    pub async fn bulk_generate(
        &self,
        order_ids: &[OrderId],
        mode: PricingMode,
        occurred_at: DateTime<Utc>,
        save: bool,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();

        for &order_id in order_ids {
            let invoice = match self
                .generate(&GenerateInvoice::new(order_id, mode, occurred_at))
                .await
            {
                Ok(invoice) => invoice,
                Err(error) => {
                    tracing::warn!(order_id = %order_id, error = %error, "bulk generation skipped order");
                    outcome.failures.push(BulkFailure {
                        order_id,
                        stage: BulkStage::Generate,
                        error,
                    });
                    continue;
                }
            };

            if save {
                match self.persist(&invoice).await {
                    Ok(record) => outcome.saved.push(record),
                    Err(error) => outcome.failures.push(BulkFailure {
                        order_id,
                        stage: BulkStage::Persist,
                        error,
                    }),
                }
            }
            outcome.generated.push(invoice);
        }

        tracing::info!(
            requested = order_ids.len(),
            generated = outcome.generated.len(),
            saved = outcome.saved.len(),
            failed = outcome.failures.len(),
            "bulk invoice generation finished"
        );
        outcome
    }

    /// Analysis, suggested items and notes for an order, without numbering,
    /// customer lookup or persistence.
    pub async fn suggestions(
        &self,
        order_id: OrderId,
        today: NaiveDate,
    ) -> Result<InvoiceSuggestions, AiError> {
        let order = self.load_order(order_id).await?;
        let analysis = self.analyzer.analyze(&order);
        let suggested_items = self.line_items.generate(&order, &analysis)?;
        let estimated_total = suggested_items.iter().map(|i| i.total_price).sum();
        let notes = self.notes.compose(&order, &analysis, today);

        Ok(InvoiceSuggestions {
            order_id,
            analysis,
            suggested_items,
            estimated_total,
            notes,
        })
    }

    pub async fn analyze_order(&self, order_id: OrderId) -> Result<OrderAnalysisReport, AiError> {
        let order = self.load_order(order_id).await?;
        Ok(OrderAnalysisReport {
            order_id,
            analysis: self.analyzer.analyze(&order),
            description: describe_order(&order),
        })
    }

    /// Statistics over persisted invoices carrying this generator's prefix.
    pub async fn stats(&self) -> Result<InvoiceStats, AiError> {
        let records = self.invoices.list().await?;
        Ok(InvoiceStats::for_prefix(&records, self.numbering.prefix()))
    }
}
