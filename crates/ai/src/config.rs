//! Rule tables and terms for invoice generation.
//!
//! Everything the generator "knows" about the shop lives in a
//! [`GeneratorConfig`] value. [`GeneratorConfig::default`] carries the shop's
//! standard tables; tests and deployments can inject their own (the types are
//! serde-deserializable, so a JSON rules file works as well).

use serde::{Deserialize, Serialize};

use crate::rules::{Complexity, KeywordRule, RuleEffect, RuleSet};

/// Standard GST rate applied to labor, add-ons and manual-mode invoices.
pub const STANDARD_TAX_RATE: f64 = 0.18;

/// Analysis values before any rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    pub category: String,
    pub complexity: Complexity,
    pub tax_rate: f64,
    pub estimated_hours: f64,
    pub material_cost_ratio: f64,
    pub labor_cost_ratio: f64,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            category: "general".to_string(),
            complexity: Complexity::Standard,
            tax_rate: STANDARD_TAX_RATE,
            estimated_hours: 2.0,
            material_cost_ratio: 0.6,
            labor_cost_ratio: 0.4,
        }
    }
}

/// The three keyword scans, applied in field order: fabric, garment, service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerRules {
    #[serde(default)]
    pub defaults: AnalysisDefaults,
    pub fabric: RuleSet,
    pub garment: RuleSet,
    pub service: RuleSet,
}

impl Default for AnalyzerRules {
    fn default() -> Self {
        use Complexity::*;
        use RuleEffect::*;

        let fabric = RuleSet::new(vec![
            KeywordRule::new("cotton").then(SetTaxRate(0.05)),
            KeywordRule::new("silk").then(SetComplexity(Premium)).then(SetTaxRate(0.12)),
            KeywordRule::new("polyester"),
            KeywordRule::new("wool").then(SetComplexity(Premium)).then(SetTaxRate(0.12)),
            KeywordRule::new("linen").then(SetTaxRate(0.05)),
            KeywordRule::new("denim"),
            KeywordRule::new("chiffon"),
            KeywordRule::new("georgette"),
        ]);

        let garment = RuleSet::new(vec![
            KeywordRule::new("shirt"),
            KeywordRule::new("pant"),
            KeywordRule::new("suit").then(SetComplexity(Complex)).then(SetHours(8.0)),
            KeywordRule::new("dress").then(SetHours(4.0)),
            KeywordRule::new("saree").then(SetComplexity(Complex)).then(SetHours(8.0)),
            KeywordRule::new("kurta").then(SetHours(4.0)),
            KeywordRule::new("salwar"),
            KeywordRule::new("blouse"),
        ]);

        let service = RuleSet::new(vec![
            KeywordRule::new("tailoring"),
            KeywordRule::new("alteration").then(ScaleHours(0.5)),
            KeywordRule::new("embroidery").then(SetComplexity(Complex)).then(ScaleHours(1.5)),
            KeywordRule::new("dyeing"),
            KeywordRule::new("cleaning"),
            KeywordRule::new("repair"),
        ]);

        Self {
            defaults: AnalysisDefaults::default(),
            fabric,
            garment,
            service,
        }
    }
}

/// Extra billable line triggered by a keyword in the order notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnRule {
    pub keyword: String,
    pub description: String,
    /// Fraction of the order value billed for this add-on.
    pub price_ratio: f64,
    pub tax_rate: f64,
}

impl AddOnRule {
    pub fn new(keyword: impl Into<String>, description: impl Into<String>, price_ratio: f64) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            description: description.into(),
            price_ratio,
            tax_rate: STANDARD_TAX_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRules {
    pub labor_tax_rate: f64,
    /// Evaluated independently, in list order; several may apply.
    pub add_ons: Vec<AddOnRule>,
}

impl Default for LineItemRules {
    fn default() -> Self {
        Self {
            labor_tax_rate: STANDARD_TAX_RATE,
            add_ons: vec![
                AddOnRule::new("embroidery", "Custom Embroidery Work", 0.2),
                AddOnRule::new("alteration", "Alteration Services", 0.1),
            ],
        }
    }
}

/// Numbering, due date and fixed wording of generated invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTerms {
    pub number_prefix: String,
    pub payment_terms_days: i64,
    /// Flat rate used when pricing is forced to the order value.
    pub manual_tax_rate: f64,
    pub payment_terms_note: String,
}

impl Default for InvoiceTerms {
    fn default() -> Self {
        Self {
            number_prefix: "TSI".to_string(),
            payment_terms_days: 30,
            manual_tax_rate: STANDARD_TAX_RATE,
            payment_terms_note: "Payment terms: 50% advance, balance on delivery.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub analyzer: AnalyzerRules,
    #[serde(default)]
    pub line_items: LineItemRules,
    #[serde(default)]
    pub terms: InvoiceTerms,
}

impl GeneratorConfig {
    /// Parse a JSON rules document; omitted sections fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_number_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.terms.number_prefix = prefix.into();
        self
    }

    pub fn with_payment_terms_days(mut self, days: i64) -> Self {
        self.terms.payment_terms_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_keep_shop_order() {
        let rules = AnalyzerRules::default();
        let fabrics: Vec<&str> = rules.fabric.rules().iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(
            fabrics,
            ["cotton", "silk", "polyester", "wool", "linen", "denim", "chiffon", "georgette"]
        );
        let services: Vec<&str> = rules.service.rules().iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(
            services,
            ["tailoring", "alteration", "embroidery", "dyeing", "cleaning", "repair"]
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg = GeneratorConfig::from_json(r#"{"terms": {"number_prefix": "TST", "payment_terms_days": 15, "manual_tax_rate": 0.18, "payment_terms_note": "Net 15."}}"#).unwrap();
        assert_eq!(cfg.terms.number_prefix, "TST");
        assert_eq!(cfg.terms.payment_terms_days, 15);
        assert_eq!(cfg.analyzer, AnalyzerRules::default());
        assert_eq!(cfg.line_items, LineItemRules::default());
    }
}
