use thiserror::Error;

use sarthi_core::{CustomerId, DomainError, OrderId, StoreError};

/// Failure of an invoice generation step.
///
/// Pure components (analyzer, line items, pricing, notes) return these with `?`;
/// the [`InvoiceGenerator`](crate::InvoiceGenerator) hands them back to its
/// caller as values. A failed generation never yields a partial invoice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Arithmetic has no meaningful result (e.g. rescaling a zero-sum item list).
    #[error("degenerate computation: {0}")]
    Degenerate(String),

    #[error("invoice {invoice_number} already exists for order {order_id}")]
    InvoiceExists {
        order_id: OrderId,
        invoice_number: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::Degenerate(msg.into())
    }

    /// Stable machine-readable code for boundaries (HTTP bodies, logs).
    pub fn code(&self) -> &'static str {
        match self {
            AiError::OrderNotFound(_) | AiError::CustomerNotFound(_) => "not_found",
            AiError::InvalidInput(_) => "invalid_input",
            AiError::Degenerate(_) => "computation_degenerate",
            AiError::InvoiceExists { .. } => "conflict",
            AiError::Store(_) => "store_failure",
        }
    }
}

impl From<DomainError> for AiError {
    fn from(err: DomainError) -> Self {
        AiError::InvalidInput(err.to_string())
    }
}
