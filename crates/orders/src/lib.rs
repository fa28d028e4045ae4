//! Orders and customers of the tailoring shop.
//!
//! The records here are owned by the shop's order book; invoice generation only
//! reads them through the [`OrderStore`] and [`CustomerStore`] collaborators.

pub mod customer;
pub mod order;
pub mod store;

pub use customer::Customer;
pub use order::{Order, OrderStatus};
pub use store::{CustomerStore, OrderStore};
