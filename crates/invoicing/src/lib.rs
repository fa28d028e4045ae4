//! Invoicing records (billing module).
//!
//! This crate owns the persisted invoice record, its status lifecycle and the
//! [`InvoiceStore`] collaborator through which generated invoices are saved.
//! No IO happens here; storage adapters live in `sarthi-infra`.

pub mod invoice;
pub mod stats;
pub mod store;

pub use invoice::{InvoiceRecord, InvoiceStatus, NewInvoice};
pub use stats::InvoiceStats;
pub use store::InvoiceStore;
