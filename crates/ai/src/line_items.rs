use serde::{Deserialize, Serialize};

use sarthi_core::ValueObject;
use sarthi_orders::Order;

use crate::analyzer::AnalysisResult;
use crate::config::{LineItemRules, STANDARD_TAX_RATE};
use crate::error::AiError;
use crate::rules::Complexity;

/// One billable line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    /// Fraction, e.g. `0.18` for 18%.
    pub tax_rate: f64,
}

impl ValueObject for LineItem {}

impl LineItem {
    /// Quantity-1 line where unit and total price coincide.
    pub fn single(description: impl Into<String>, price: f64, tax_rate: f64) -> Self {
        Self {
            description: description.into(),
            quantity: 1,
            unit_price: price,
            total_price: price,
            tax_rate,
        }
    }

    /// Build a caller-supplied line, rejecting values pricing cannot work with.
    pub fn validated(
        description: impl Into<String>,
        quantity: u32,
        unit_price: f64,
        total_price: f64,
        tax_rate: f64,
    ) -> Result<Self, AiError> {
        if quantity == 0 {
            return Err(AiError::invalid_input("line item quantity must be at least 1"));
        }
        for (field, value) in [
            ("unit_price", unit_price),
            ("total_price", total_price),
            ("tax_rate", tax_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AiError::invalid_input(format!(
                    "line item {field} must be a non-negative number"
                )));
            }
        }
        Ok(Self {
            description: description.into(),
            quantity,
            unit_price,
            total_price,
            tax_rate,
        })
    }

    pub fn tax_amount(&self) -> f64 {
        self.total_price * self.tax_rate
    }

    fn rescale(&mut self, factor: f64) {
        self.unit_price *= factor;
        self.total_price *= factor;
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::single(String::new(), 0.0, STANDARD_TAX_RATE)
    }
}

/// Turns an analyzed order into priced line items.
///
/// Output order is fixed: main item, labor, then add-ons in rule order. The
/// add-ons draw on the full order value again, so item totals may exceed it.
#[derive(Debug, Clone, Default)]
pub struct LineItemGenerator {
    rules: LineItemRules,
}

impl LineItemGenerator {
    pub fn new(rules: LineItemRules) -> Self {
        Self { rules }
    }

    pub fn generate(&self, order: &Order, analysis: &AnalysisResult) -> Result<Vec<LineItem>, AiError> {
        if order.quantity == 0 {
            return Err(AiError::invalid_input("order quantity must be at least 1"));
        }
        if !order.order_value.is_finite() || order.order_value < 0.0 {
            return Err(AiError::invalid_input("order value must be a non-negative number"));
        }

        let base = order.order_value;
        let mut items = Vec::with_capacity(2 + self.rules.add_ons.len());

        let material_total = base * analysis.material_cost_ratio;
        items.push(LineItem {
            description: format!(
                "{} - {} ({})",
                title_case(&order.order_type),
                order.fabric_or_empty(),
                order.color_or_empty()
            ),
            quantity: order.quantity,
            unit_price: material_total / f64::from(order.quantity),
            total_price: material_total,
            tax_rate: analysis.tax_rate,
        });

        if analysis.complexity != Complexity::MaterialOnly {
            items.push(LineItem::single(
                format!(
                    "Tailoring Services - {} ({}hrs)",
                    analysis.complexity.label(),
                    format_hours(analysis.estimated_hours)
                ),
                base * analysis.labor_cost_ratio,
                self.rules.labor_tax_rate,
            ));
        }

        let notes = order.notes_or_empty().to_lowercase();
        for add_on in &self.rules.add_ons {
            if !add_on.keyword.is_empty() && notes.contains(add_on.keyword.as_str()) {
                items.push(LineItem::single(
                    add_on.description.clone(),
                    base * add_on.price_ratio,
                    add_on.tax_rate,
                ));
            }
        }

        Ok(items)
    }
}

/// Rescale every item by one factor (used by manual pricing).
pub(crate) fn rescale_all(items: &mut [LineItem], factor: f64) {
    for item in items {
        item.rescale(factor);
    }
}

/// Hours as shown to customers: whole values without a fraction, others
/// with at most two decimals.
pub(crate) fn format_hours(hours: f64) -> String {
    let fixed = format!("{hours:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderAnalyzer;
    use sarthi_core::CustomerId;

    fn generate(order: &Order) -> Vec<LineItem> {
        let analysis = OrderAnalyzer::default().analyze(order);
        LineItemGenerator::default().generate(order, &analysis).unwrap()
    }

    #[test]
    fn hours_print_without_float_noise() {
        assert_eq!(format_hours(8.0), "8");
        assert_eq!(format_hours(6.0), "6");
        assert_eq!(format_hours(1.5), "1.5");
        assert_eq!(format_hours(0.1 + 0.2), "0.3");
        assert_eq!(format_hours(10.0), "10");
    }

    #[test]
    fn main_and_labor_split_order_value() {
        let order = Order::new(CustomerId::new(), "Asha", "shirt", 2, 2500.0)
            .with_fabric("cotton")
            .with_color("white");
        let items = generate(&order);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "Shirt - cotton (white)");
        assert_eq!(items[0].quantity, 2);
        assert!((items[0].total_price - 1500.0).abs() < 1e-9);
        assert!((items[0].unit_price - 750.0).abs() < 1e-9);
        assert_eq!(items[0].tax_rate, 0.05);

        assert_eq!(items[1].description, "Tailoring Services - Standard (2hrs)");
        assert_eq!(items[1].quantity, 1);
        assert!((items[1].total_price - 1000.0).abs() < 1e-9);
        assert_eq!(items[1].unit_price, items[1].total_price);
        assert_eq!(items[1].tax_rate, 0.18);
    }

    #[test]
    fn both_add_ons_apply_in_fixed_order() {
        let order = Order::new(CustomerId::new(), "Asha", "blouse", 1, 1000.0)
            .with_notes("Alteration needed, plus EMBROIDERY on sleeves");
        let items = generate(&order);

        let descriptions: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(
            descriptions,
            [
                "Blouse -  ()",
                "Tailoring Services - Standard (1hrs)",
                "Custom Embroidery Work",
                "Alteration Services",
            ]
        );
        assert!((items[2].total_price - 200.0).abs() < 1e-9);
        assert!((items[3].total_price - 100.0).abs() < 1e-9);

        // Add-ons draw on the order value again.
        let sum: f64 = items.iter().map(|i| i.total_price).sum();
        assert!(sum > order.order_value);
    }

    #[test]
    fn add_ons_only_look_at_notes() {
        let order = Order::new(CustomerId::new(), "Asha", "embroidery kurta", 1, 1000.0);
        let items = generate(&order);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn zero_quantity_is_invalid_input() {
        let order = Order::new(CustomerId::new(), "Asha", "shirt", 0, 1000.0);
        let analysis = OrderAnalyzer::default().analyze(&order);
        let err = LineItemGenerator::default().generate(&order, &analysis).unwrap_err();
        assert!(matches!(err, AiError::InvalidInput(_)));
    }

    #[test]
    fn negative_order_value_is_invalid_input() {
        let order = Order::new(CustomerId::new(), "Asha", "shirt", 1, -5.0);
        let analysis = OrderAnalyzer::default().analyze(&order);
        assert!(LineItemGenerator::default().generate(&order, &analysis).is_err());
    }

    #[test]
    fn material_only_skips_labor() {
        let order = Order::new(CustomerId::new(), "Asha", "fabric roll", 4, 800.0);
        let mut analysis = OrderAnalyzer::default().analyze(&order);
        analysis.complexity = Complexity::MaterialOnly;
        let items = LineItemGenerator::default().generate(&order, &analysis).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Fabric Roll -  ()");
    }

    #[test]
    fn fractional_hours_show_in_labor_description() {
        let order = Order::new(CustomerId::new(), "Asha", "dress", 1, 1000.0)
            .with_notes("embroidery");
        let items = generate(&order);
        assert_eq!(items[1].description, "Tailoring Services - Complex (6hrs)");

        let order = Order::new(CustomerId::new(), "Asha", "shirt", 1, 1000.0)
            .with_notes("embroidery");
        let items = generate(&order);
        assert_eq!(items[1].description, "Tailoring Services - Complex (3hrs)");

        let order = Order::new(CustomerId::new(), "Asha", "pant", 1, 1000.0)
            .with_notes("alteration");
        let items = generate(&order);
        assert_eq!(items[1].description, "Tailoring Services - Standard (1hrs)");

        let order = Order::new(CustomerId::new(), "Asha", "kurta", 1, 1000.0)
            .with_notes("alteration");
        let items = generate(&order);
        assert_eq!(items[1].description, "Tailoring Services - Standard (2hrs)");
    }

    #[test]
    fn validated_rejects_bad_lines() {
        assert!(LineItem::validated("x", 0, 1.0, 1.0, 0.18).is_err());
        assert!(LineItem::validated("x", 1, f64::NAN, 1.0, 0.18).is_err());
        assert!(LineItem::validated("x", 1, 1.0, -1.0, 0.18).is_err());
        assert!(LineItem::validated("x", 1, 1.0, 1.0, 0.18).is_ok());
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("navy blue"), "Navy Blue");
        assert_eq!(title_case("SALWAR-kameez"), "Salwar-Kameez");
        assert_eq!(title_case(""), "");
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::OrderAnalyzer;
    use proptest::prelude::*;
    use sarthi_core::CustomerId;

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: main item unit_price × quantity reproduces total_price.
        #[test]
        fn main_item_unit_times_quantity_is_total(
            quantity in 1u32..500,
            value in 0.0f64..1_000_000.0,
            garment in prop::sample::select(vec!["shirt", "suit", "dress", "saree", "pant"]),
        ) {
            let order = Order::new(CustomerId::new(), "P", garment, quantity, value);
            let analysis = OrderAnalyzer::default().analyze(&order);
            let items = LineItemGenerator::default().generate(&order, &analysis).unwrap();
            let main = &items[0];
            prop_assert_eq!(main.quantity, quantity);
            let tolerance = 1e-9 * main.total_price.abs().max(1.0);
            prop_assert!((main.unit_price * f64::from(quantity) - main.total_price).abs() <= tolerance);
            for extra in &items[1..] {
                prop_assert_eq!(extra.quantity, 1);
                prop_assert_eq!(extra.unit_price, extra.total_price);
            }
        }
    }
}
