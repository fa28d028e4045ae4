//! Subtotal, tax and total computation.

use serde::{Deserialize, Serialize};

use sarthi_core::ValueObject;

use crate::error::AiError;
use crate::line_items::{LineItem, rescale_all};

/// How invoice totals are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Totals follow the generated items, taxed per item.
    #[default]
    Auto,
    /// Subtotal forced to the order value, flat tax, items rescaled to match.
    Manual,
}

impl PricingMode {
    pub fn from_auto_calculate(auto_calculate: bool) -> Self {
        if auto_calculate {
            PricingMode::Auto
        } else {
            PricingMode::Manual
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

impl ValueObject for PricingSummary {}

/// Per-item tax contribution, in item order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub description: String,
    pub tax_rate: f64,
    pub tax_amount: f64,
}

/// Auto mode: Σ totals, tax at each item's own rate.
pub fn calculate(items: &[LineItem]) -> PricingSummary {
    let subtotal: f64 = items.iter().map(|i| i.total_price).sum();
    let tax_amount: f64 = items.iter().map(LineItem::tax_amount).sum();
    PricingSummary {
        subtotal,
        tax_amount,
        total_amount: subtotal + tax_amount,
    }
}

/// Manual mode: subtotal is `order_value`, tax is `flat_tax_rate` of it, and the
/// items are rescaled in place so their totals add up to the subtotal.
///
/// Fails without touching `items` when they are empty or sum to zero.
pub fn rebalance_to_order_value(
    items: &mut [LineItem],
    order_value: f64,
    flat_tax_rate: f64,
) -> Result<PricingSummary, AiError> {
    if items.is_empty() {
        return Err(AiError::degenerate("cannot rebalance an empty item list"));
    }
    let items_total: f64 = items.iter().map(|i| i.total_price).sum();
    if items_total == 0.0 || !items_total.is_finite() {
        return Err(AiError::degenerate(format!(
            "cannot rescale items summing to {items_total}"
        )));
    }

    let subtotal = order_value;
    let tax_amount = subtotal * flat_tax_rate;
    rescale_all(items, subtotal / items_total);

    Ok(PricingSummary {
        subtotal,
        tax_amount,
        total_amount: subtotal + tax_amount,
    })
}

pub fn tax_breakdown(items: &[LineItem]) -> Vec<TaxLine> {
    items
        .iter()
        .map(|i| TaxLine {
            description: i.description.clone(),
            tax_rate: i.tax_rate,
            tax_amount: i.tax_amount(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suit_items() -> Vec<LineItem> {
        vec![
            LineItem::single("Suit - wool (navy)", 5100.0, 0.12),
            LineItem::single("Tailoring Services - Complex (8hrs)", 3400.0, 0.18),
            LineItem::single("Custom Embroidery Work", 1700.0, 0.18),
        ]
    }

    #[test]
    fn auto_mode_taxes_each_item_at_its_rate() {
        let s = calculate(&suit_items());
        assert!((s.subtotal - 10200.0).abs() < 1e-9);
        assert!((s.tax_amount - 1530.0).abs() < 1e-9);
        assert!((s.total_amount - 11730.0).abs() < 1e-9);
    }

    #[test]
    fn empty_items_price_to_zero() {
        let s = calculate(&[]);
        assert_eq!(s.subtotal, 0.0);
        assert_eq!(s.tax_amount, 0.0);
        assert_eq!(s.total_amount, 0.0);
    }

    #[test]
    fn manual_mode_forces_subtotal_and_flat_tax() {
        let mut items = suit_items();
        let s = rebalance_to_order_value(&mut items, 8500.0, 0.18).unwrap();
        assert_eq!(s.subtotal, 8500.0);
        assert!((s.tax_amount - 1530.0).abs() < 1e-9);
        assert!((s.total_amount - 10030.0).abs() < 1e-9);

        let rescaled: f64 = items.iter().map(|i| i.total_price).sum();
        assert!((rescaled - 8500.0).abs() < 1e-6);
        // 5100 × (8500 / 10200)
        assert!((items[0].total_price - 4250.0).abs() < 1e-9);
        assert_eq!(items[0].unit_price, items[0].total_price);
    }

    #[test]
    fn manual_mode_on_degenerate_items_fails_untouched() {
        let mut none: Vec<LineItem> = Vec::new();
        assert!(matches!(
            rebalance_to_order_value(&mut none, 100.0, 0.18),
            Err(AiError::Degenerate(_))
        ));

        let mut zeros = vec![LineItem::single("free", 0.0, 0.18)];
        assert!(matches!(
            rebalance_to_order_value(&mut zeros, 100.0, 0.18),
            Err(AiError::Degenerate(_))
        ));
        assert_eq!(zeros[0].total_price, 0.0);
    }

    #[test]
    fn breakdown_follows_item_order() {
        let lines = tax_breakdown(&suit_items());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].description, "Suit - wool (navy)");
        assert!((lines[0].tax_amount - 612.0).abs() < 1e-9);
        assert!((lines[1].tax_amount - 612.0).abs() < 1e-9);
        assert!((lines[2].tax_amount - 306.0).abs() < 1e-9);
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(PricingMode::from_auto_calculate(true), PricingMode::Auto);
        assert_eq!(PricingMode::from_auto_calculate(false), PricingMode::Manual);
    }
}
