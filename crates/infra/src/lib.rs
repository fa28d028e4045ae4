//! Infrastructure layer: configuration, store adapters and sample data.
//!
//! - [`config`]: environment-driven application settings.
//! - [`memory`]: `RwLock<HashMap>` stores for tests and local runs.
//! - [`postgres`]: `sqlx` adapter implementing every store trait over one pool.
//! - [`sample_data`]: the demo shop (customers and orders) used for seeding.

pub mod config;
pub mod memory;
pub mod postgres;
pub mod sample_data;

pub use config::{AppConfig, ConfigError};
pub use memory::{InMemoryCustomerStore, InMemoryInvoiceStore, InMemoryOrderStore};
pub use postgres::PostgresStore;
pub use sample_data::SampleShop;
