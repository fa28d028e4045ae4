//! Priority-ordered keyword rules.
//!
//! A [`RuleSet`] is scanned top to bottom and stops at the first rule whose
//! keyword occurs in the text. List order decides ties, never text order.

use serde::{Deserialize, Serialize};

/// Complexity tier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Standard,
    Premium,
    Complex,
    /// Material-only sale: no labor line is billed.
    ///
    /// The shop's default rules never produce this tier; custom rule sets may.
    MaterialOnly,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Standard => "standard",
            Complexity::Premium => "premium",
            Complexity::Complex => "complex",
            Complexity::MaterialOnly => "material_only",
        }
    }

    /// Title-cased label used in line-item descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Standard => "Standard",
            Complexity::Premium => "Premium",
            Complexity::Complex => "Complex",
            Complexity::MaterialOnly => "Material Only",
        }
    }
}

impl core::fmt::Display for Complexity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change applied to an analysis when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum RuleEffect {
    SetComplexity(Complexity),
    SetTaxRate(f64),
    SetHours(f64),
    ScaleHours(f64),
}

/// A keyword plus the effects it triggers.
///
/// A rule with no effects still matches and therefore still ends the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    #[serde(default)]
    pub effects: Vec<RuleEffect>,
}

impl KeywordRule {
    /// Keywords are stored lower-cased; callers pass lower-cased text.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            effects: Vec::new(),
        }
    }

    pub fn then(mut self, effect: RuleEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn matches(&self, lowered_text: &str) -> bool {
        // Rules loaded from JSON bypass `new`, so normalize here as well.
        !self.keyword.is_empty() && lowered_text.contains(self.keyword.to_lowercase().as_str())
    }
}

/// Ordered, first-match-wins list of keyword rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<KeywordRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// First rule (in list order) whose keyword occurs in `lowered_text`.
    pub fn first_match(&self, lowered_text: &str) -> Option<&KeywordRule> {
        self.rules.iter().find(|rule| rule.matches(lowered_text))
    }
}

impl FromIterator<KeywordRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = KeywordRule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
