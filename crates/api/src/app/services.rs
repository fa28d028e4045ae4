//! Service wiring: picks the store backend and builds the invoice generator.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use sarthi_ai::{GeneratorConfig, InvoiceGenerator};
use sarthi_core::StoreResult;
use sarthi_infra::{
    AppConfig, InMemoryCustomerStore, InMemoryInvoiceStore, InMemoryOrderStore, PostgresStore,
    SampleShop,
};
use sarthi_invoicing::InvoiceStore;
use sarthi_orders::{CustomerStore, OrderStore};

pub type InvoiceService =
    InvoiceGenerator<Arc<dyn OrderStore>, Arc<dyn CustomerStore>, Arc<dyn InvoiceStore>>;

pub struct AppServices {
    pub generator: InvoiceService,
}

impl AppServices {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        customers: Arc<dyn CustomerStore>,
        invoices: Arc<dyn InvoiceStore>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            generator: InvoiceGenerator::new(orders, customers, invoices, config),
        }
    }

    /// In-memory stores, optionally pre-filled with a sample shop.
    pub fn in_memory(config: GeneratorConfig, seed: Option<&SampleShop>) -> StoreResult<Self> {
        let orders = Arc::new(InMemoryOrderStore::new());
        let customers = Arc::new(InMemoryCustomerStore::new());
        let invoices = Arc::new(InMemoryInvoiceStore::new());

        if let Some(shop) = seed {
            shop.seed_in_memory(&customers, &orders)?;
        }

        Ok(Self::new(orders, customers, invoices, config))
    }

    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let generator_config = generator_config(config)?;

        if config.use_persistent_stores {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
            let store = Arc::new(PostgresStore::connect(url).await?);
            store.ensure_schema().await?;
            if config.seed_sample_data {
                SampleShop::new(Utc::now()).seed_postgres(&store).await?;
            }
            tracing::info!("using postgres stores");
            return Ok(Self::new(
                store.clone(),
                store.clone(),
                store,
                generator_config,
            ));
        }

        tracing::info!(seed = config.seed_sample_data, "using in-memory stores");
        let shop = config.seed_sample_data.then(|| SampleShop::new(Utc::now()));
        Ok(Self::in_memory(generator_config, shop.as_ref())?)
    }
}

fn generator_config(config: &AppConfig) -> anyhow::Result<GeneratorConfig> {
    let base = match &config.rules_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read rules file {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded generator rules");
            GeneratorConfig::from_json(&raw)
                .with_context(|| format!("invalid rules file {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    Ok(base
        .with_number_prefix(config.invoice_prefix.clone())
        .with_payment_terms_days(config.payment_terms_days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_generator_terms() {
        let config = AppConfig {
            invoice_prefix: "XYZ".to_string(),
            payment_terms_days: 10,
            ..AppConfig::default()
        };
        let generator = generator_config(&config).unwrap();
        assert_eq!(generator.terms.number_prefix, "XYZ");
        assert_eq!(generator.terms.payment_terms_days, 10);
    }

    #[test]
    fn missing_rules_file_is_an_error() {
        let config = AppConfig {
            rules_file: Some("/nonexistent/sarthi-rules.json".into()),
            ..AppConfig::default()
        };
        assert!(generator_config(&config).is_err());
    }
}
