use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use sarthi_core::{CustomerId, DomainError, DomainResult, Entity, InvoiceId, OrderId};

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            "overdue" => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }
}

/// Invoice as handed to the store for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    /// Pre-tax amount (the invoice subtotal).
    pub amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

impl NewInvoice {
    /// Check the fields a store would otherwise reject half-way through a write.
    pub fn validate(&self) -> DomainResult<()> {
        if self.invoice_number.trim().is_empty() {
            return Err(DomainError::validation("invoice_number must not be empty"));
        }
        for (field, value) in [
            ("amount", self.amount),
            ("tax_amount", self.tax_amount),
            ("total_amount", self.total_amount),
        ] {
            if !value.is_finite() {
                return Err(DomainError::validation(format!("{field} must be finite")));
            }
            if value < 0.0 {
                return Err(DomainError::validation(format!(
                    "{field} must not be negative"
                )));
            }
        }
        Ok(())
    }

    /// Materialize the persisted record with a store-assigned id and timestamp.
    pub fn into_record(self, id: InvoiceId, created_at: DateTime<Utc>) -> InvoiceRecord {
        InvoiceRecord {
            id,
            invoice_number: self.invoice_number,
            order_id: self.order_id,
            customer_id: self.customer_id,
            amount: self.amount,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            status: self.status,
            due_date: self.due_date,
            paid_date: None,
            payment_method: None,
            notes: self.notes,
            created_at,
        }
    }
}

/// Durable invoice record owned by the billing module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for InvoiceRecord {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewInvoice {
        NewInvoice {
            invoice_number: "TSI-20261016-AB12CD".to_string(),
            order_id: OrderId::new(),
            customer_id: CustomerId::new(),
            amount: 1000.0,
            tax_amount: 180.0,
            total_amount: 1180.0,
            status: InvoiceStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2026, 11, 15),
            notes: String::new(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_invoice_number_is_rejected() {
        let mut inv = draft();
        inv.invoice_number = "   ".to_string();
        match inv.validate().unwrap_err() {
            DomainError::Validation(msg) if msg.contains("invoice_number") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_or_negative_amounts_are_rejected() {
        let mut inv = draft();
        inv.tax_amount = f64::NAN;
        assert!(inv.validate().is_err());

        let mut inv = draft();
        inv.total_amount = -1.0;
        match inv.validate().unwrap_err() {
            DomainError::Validation(msg) if msg.contains("total_amount") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn into_record_keeps_links_and_starts_unpaid() {
        let inv = draft();
        let (order_id, customer_id) = (inv.order_id, inv.customer_id);
        let id = InvoiceId::new();
        let record = inv.into_record(id, Utc::now());

        assert_eq!(record.id, id);
        assert_eq!(record.order_id, order_id);
        assert_eq!(record.customer_id, customer_id);
        assert_eq!(record.status, InvoiceStatus::Pending);
        assert!(record.paid_date.is_none());
        assert!(record.payment_method.is_none());
    }

    #[test]
    fn status_strings_round_trip() {
        for s in [InvoiceStatus::Pending, InvoiceStatus::Paid, InvoiceStatus::Overdue] {
            assert_eq!(InvoiceStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(InvoiceStatus::parse("void"), None);
    }
}
