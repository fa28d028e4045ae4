use chrono::NaiveDate;

use sarthi_orders::Order;

use crate::analyzer::AnalysisResult;
use crate::line_items::format_hours;
use crate::rules::Complexity;

const PREMIUM_NOTE: &str = "Premium quality materials used.";
const COMPLEX_NOTE: &str = "Complex tailoring work requiring expert craftsmanship.";
const RUSH_NOTE: &str = "Rush order - expedited processing.";
const STANDARD_TIMELINE_NOTE: &str = "Standard processing timeline.";

/// Deliveries this close (or overdue) are rush orders.
pub const RUSH_WITHIN_DAYS: i64 = 3;
/// Deliveries further out than this get the standard-timeline note.
pub const STANDARD_BEYOND_DAYS: i64 = 14;
/// Jobs longer than this mention their estimated hours.
pub const LONG_JOB_HOURS: f64 = 5.0;

/// Builds the free-text notes printed on an invoice.
#[derive(Debug, Clone)]
pub struct NoteComposer {
    payment_terms: String,
}

impl NoteComposer {
    pub fn new(payment_terms: impl Into<String>) -> Self {
        Self {
            payment_terms: payment_terms.into(),
        }
    }

    /// `today` anchors the delivery countdown; 4..=14 days out adds no timing note.
    pub fn compose(&self, order: &Order, analysis: &AnalysisResult, today: NaiveDate) -> String {
        let mut notes: Vec<String> = Vec::new();

        match analysis.complexity {
            Complexity::Premium => notes.push(PREMIUM_NOTE.to_string()),
            Complexity::Complex => notes.push(COMPLEX_NOTE.to_string()),
            Complexity::Standard | Complexity::MaterialOnly => {}
        }

        if analysis.estimated_hours > LONG_JOB_HOURS {
            notes.push(format!(
                "Estimated completion time: {} hours.",
                format_hours(analysis.estimated_hours)
            ));
        }

        if let Some(delivery) = order.delivery_date {
            let days_to_delivery = (delivery - today).num_days();
            if days_to_delivery <= RUSH_WITHIN_DAYS {
                notes.push(RUSH_NOTE.to_string());
            } else if days_to_delivery > STANDARD_BEYOND_DAYS {
                notes.push(STANDARD_TIMELINE_NOTE.to_string());
            }
        }

        notes.push(self.payment_terms.clone());
        notes.join(" ")
    }
}

impl Default for NoteComposer {
    fn default() -> Self {
        Self::new(crate::config::InvoiceTerms::default().payment_terms_note)
    }
}
