//! Starter invoice templates for common jobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub description: String,
    pub unit_price: f64,
    pub tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTemplate {
    pub items: Vec<TemplateItem>,
    pub notes: String,
}

fn item(description: &str, unit_price: f64, tax_rate: f64) -> TemplateItem {
    TemplateItem {
        description: description.to_string(),
        unit_price,
        tax_rate,
    }
}

/// Fixed catalogue keyed by job kind.
pub fn invoice_templates() -> BTreeMap<&'static str, InvoiceTemplate> {
    BTreeMap::from([
        (
            "shirt_tailoring",
            InvoiceTemplate {
                items: vec![
                    item("Custom Shirt - Premium Fabric", 1200.0, 0.12),
                    item("Tailoring Services - Standard", 800.0, 0.18),
                ],
                notes: "Premium shirt tailoring with custom measurements.".to_string(),
            },
        ),
        (
            "suit_tailoring",
            InvoiceTemplate {
                items: vec![
                    item("Custom Suit - Premium Fabric", 5000.0, 0.12),
                    item("Complex Tailoring Services", 3000.0, 0.18),
                    item("Premium Finishing", 1000.0, 0.18),
                ],
                notes: "Complex suit tailoring requiring expert craftsmanship. Estimated completion time: 8 hours.".to_string(),
            },
        ),
        (
            "saree_services",
            InvoiceTemplate {
                items: vec![
                    item("Saree Fabric - Silk", 3000.0, 0.05),
                    item("Blouse Stitching", 800.0, 0.18),
                    item("Fall & Pico Work", 200.0, 0.18),
                ],
                notes: "Premium quality silk saree with professional blouse stitching.".to_string(),
            },
        ),
        (
            "alteration_services",
            InvoiceTemplate {
                items: vec![item("Garment Alteration Services", 300.0, 0.18)],
                notes: "Quick alteration services with standard processing timeline.".to_string(),
            },
        ),
    ])
}
