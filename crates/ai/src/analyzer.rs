use serde::{Deserialize, Serialize};

use sarthi_core::ValueObject;
use sarthi_orders::Order;

use crate::config::{AnalysisDefaults, AnalyzerRules};
use crate::rules::{Complexity, KeywordRule, RuleEffect, RuleSet};

/// Classification of an order's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: String,
    pub complexity: Complexity,
    /// Tax rate of the main (material) item, as a fraction.
    pub tax_rate: f64,
    pub estimated_hours: f64,
    pub material_cost_ratio: f64,
    pub labor_cost_ratio: f64,
    /// Keywords that ended each scan, in scan order.
    #[serde(default)]
    pub matched_keywords: Vec<String>,
}

impl ValueObject for AnalysisResult {}

impl AnalysisResult {
    fn from_defaults(defaults: &AnalysisDefaults) -> Self {
        Self {
            category: defaults.category.clone(),
            complexity: defaults.complexity,
            tax_rate: defaults.tax_rate,
            estimated_hours: defaults.estimated_hours,
            material_cost_ratio: defaults.material_cost_ratio,
            labor_cost_ratio: defaults.labor_cost_ratio,
            matched_keywords: Vec::new(),
        }
    }

    fn apply(&mut self, rule: &KeywordRule) {
        for effect in &rule.effects {
            match *effect {
                RuleEffect::SetComplexity(c) => self.complexity = c,
                RuleEffect::SetTaxRate(rate) => self.tax_rate = rate,
                RuleEffect::SetHours(hours) => self.estimated_hours = hours,
                RuleEffect::ScaleHours(factor) => self.estimated_hours *= factor,
            }
        }
        self.matched_keywords.push(rule.keyword.clone());
    }
}

/// Keyword classifier over an order's free text.
///
/// Scans fabric, then garment, then service rules. Within a scan the first
/// matching rule wins; across scans later effects overwrite earlier ones
/// (e.g. "wool suit" ends up `complex`, keeping wool's 12% tax rate).
#[derive(Debug, Clone, Default)]
pub struct OrderAnalyzer {
    rules: AnalyzerRules,
}

impl OrderAnalyzer {
    pub fn new(rules: AnalyzerRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AnalyzerRules {
        &self.rules
    }

    pub fn analyze(&self, order: &Order) -> AnalysisResult {
        let text = order_text(order);
        let mut analysis = AnalysisResult::from_defaults(&self.rules.defaults);

        let scans: [&RuleSet; 3] = [&self.rules.fabric, &self.rules.garment, &self.rules.service];
        for scan in scans {
            if let Some(rule) = scan.first_match(&text) {
                analysis.apply(rule);
            }
        }

        analysis
    }
}

/// Lower-cased "type fabric color notes"; missing fields contribute nothing.
fn order_text(order: &Order) -> String {
    format!(
        "{} {} {} {}",
        order.order_type,
        order.fabric_or_empty(),
        order.color_or_empty(),
        order.notes_or_empty()
    )
    .to_lowercase()
}
