//! `sarthi-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity/value-object markers and the error model shared by
//! the order, invoicing and generator crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, StoreError, StoreResult};
pub use id::{CustomerId, InvoiceId, OrderId};
pub use value_object::ValueObject;
