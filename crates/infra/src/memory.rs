//! In-memory stores for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use sarthi_core::{CustomerId, InvoiceId, OrderId, StoreError, StoreResult};
use sarthi_invoicing::{InvoiceRecord, InvoiceStore, NewInvoice};
use sarthi_orders::{Customer, CustomerStore, Order, OrderStore};

fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}

#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(order.id, order);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&order_id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, customer: Customer) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(customer.id, customer);
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn get(&self, customer_id: CustomerId) -> StoreResult<Option<Customer>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&customer_id).cloned())
    }
}

/// Invoice records in insertion order. Invoice numbers are unique.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    records: RwLock<Vec<InvoiceRecord>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn create(&self, invoice: NewInvoice) -> StoreResult<InvoiceRecord> {
        // Check and insert under one write lock so a duplicate never lands.
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records
            .iter()
            .any(|r| r.invoice_number == invoice.invoice_number)
        {
            return Err(StoreError::conflict(format!(
                "invoice number {} already exists",
                invoice.invoice_number
            )));
        }

        let record = invoice.into_record(InvoiceId::new(), Utc::now());
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_order(&self, order_id: OrderId) -> StoreResult<Option<InvoiceRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().find(|r| r.order_id == order_id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<InvoiceRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarthi_invoicing::InvoiceStatus;

    fn new_invoice(number: &str, order_id: OrderId) -> NewInvoice {
        NewInvoice {
            invoice_number: number.to_string(),
            order_id,
            customer_id: CustomerId::new(),
            amount: 1000.0,
            tax_amount: 180.0,
            total_amount: 1180.0,
            status: InvoiceStatus::Pending,
            due_date: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn orders_round_trip_by_id() {
        let store = InMemoryOrderStore::new();
        let order = Order::new(CustomerId::new(), "Asha", "blouse", 1, 700.0);
        let id = order.id;
        store.insert(order.clone()).unwrap();

        assert_eq!(store.get(id).await.unwrap(), Some(order));
        assert_eq!(store.get(OrderId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn customers_round_trip_by_id() {
        let store = InMemoryCustomerStore::new();
        let customer = Customer::new("Asha");
        let id = customer.id;
        store.insert(customer.clone()).unwrap();

        assert_eq!(store.get(id).await.unwrap(), Some(customer));
    }

    #[tokio::test]
    async fn duplicate_invoice_number_is_a_conflict() {
        let store = InMemoryInvoiceStore::new();
        store
            .create(new_invoice("TSI-20250101-AAAAAA", OrderId::new()))
            .await
            .unwrap();

        let err = store
            .create(new_invoice("TSI-20250101-AAAAAA", OrderId::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn finds_invoice_by_order() {
        let store = InMemoryInvoiceStore::new();
        let order_id = OrderId::new();
        let record = store
            .create(new_invoice("TSI-20250101-BBBBBB", order_id))
            .await
            .unwrap();

        assert_eq!(store.find_by_order(order_id).await.unwrap(), Some(record));
        assert_eq!(store.find_by_order(OrderId::new()).await.unwrap(), None);
    }
}
