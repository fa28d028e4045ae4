//! Persistence collaborator for invoice records.

use std::sync::Arc;

use async_trait::async_trait;

use sarthi_core::{OrderId, StoreResult};

use crate::{InvoiceRecord, NewInvoice};

/// Durable invoice storage.
///
/// `create` is all-or-nothing: on `Err` no record for the invoice exists.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn create(&self, invoice: NewInvoice) -> StoreResult<InvoiceRecord>;

    /// The invoice already issued for an order, if any.
    async fn find_by_order(&self, order_id: OrderId) -> StoreResult<Option<InvoiceRecord>>;

    async fn list(&self) -> StoreResult<Vec<InvoiceRecord>>;
}

#[async_trait]
impl<S> InvoiceStore for Arc<S>
where
    S: InvoiceStore + ?Sized,
{
    async fn create(&self, invoice: NewInvoice) -> StoreResult<InvoiceRecord> {
        (**self).create(invoice).await
    }

    async fn find_by_order(&self, order_id: OrderId) -> StoreResult<Option<InvoiceRecord>> {
        (**self).find_by_order(order_id).await
    }

    async fn list(&self) -> StoreResult<Vec<InvoiceRecord>> {
        (**self).list().await
    }
}
