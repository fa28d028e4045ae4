//! `sarthi-ai`
//!
//! **Responsibility:** rule-based invoice generation for tailoring orders.
//!
//! The "AI" here is deterministic keyword matching: the order text is scanned
//! against priority-ordered rule lists, the classification drives priced line
//! items, and the line items drive tax and totals.
//!
//! - [`OrderAnalyzer`]: fabric / garment / service classification.
//! - [`LineItemGenerator`]: main, labor and add-on line items.
//! - [`pricing`]: subtotal, per-item tax and the manual rebalancing mode.
//! - [`NoteComposer`]: human-readable invoice notes.
//! - [`InvoiceGenerator`]: orchestration over the order/customer/invoice stores.
//!
//! Pure components never touch storage; only the generator does, through the
//! collaborator traits from `sarthi-orders` and `sarthi-invoicing`.

pub mod analyzer;
pub mod config;
pub mod description;
pub mod error;
pub mod generator;
pub mod line_items;
pub mod notes;
pub mod numbering;
pub mod pricing;
pub mod rules;
pub mod templates;

pub use analyzer::{AnalysisResult, OrderAnalyzer};
pub use config::{AddOnRule, AnalysisDefaults, AnalyzerRules, GeneratorConfig, InvoiceTerms, LineItemRules};
pub use description::describe_order;
pub use error::AiError;
pub use generator::{
    BulkFailure, BulkOutcome, BulkStage, GenerateInvoice, GeneratedInvoice, InvoiceGenerator,
    InvoiceSuggestions, OrderAnalysisReport,
};
pub use line_items::{LineItem, LineItemGenerator};
pub use notes::NoteComposer;
pub use numbering::InvoiceNumbering;
pub use pricing::{PricingMode, PricingSummary, TaxLine};
pub use rules::{Complexity, KeywordRule, RuleEffect, RuleSet};
pub use templates::{InvoiceTemplate, TemplateItem, invoice_templates};
