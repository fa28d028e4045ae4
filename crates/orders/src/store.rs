//! Read access to orders and customers.

use std::sync::Arc;

use async_trait::async_trait;

use sarthi_core::{CustomerId, OrderId, StoreResult};

use crate::{Customer, Order};

/// Lookup of orders by id. `Ok(None)` means the order does not exist.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>>;
}

/// Lookup of customers by id. `Ok(None)` means the customer does not exist.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn get(&self, customer_id: CustomerId) -> StoreResult<Option<Customer>>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn get(&self, order_id: OrderId) -> StoreResult<Option<Order>> {
        (**self).get(order_id).await
    }
}

#[async_trait]
impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    async fn get(&self, customer_id: CustomerId) -> StoreResult<Option<Customer>> {
        (**self).get(customer_id).await
    }
}
