//! Application settings read from the environment.
//!
//! | Variable                | Default          |
//! |-------------------------|------------------|
//! | `BIND_ADDR`             | `0.0.0.0:8080`   |
//! | `USE_PERSISTENT_STORES` | `false`          |
//! | `DATABASE_URL`          | required when persistent |
//! | `LOG_FORMAT`            | `json`           |
//! | `SEED_SAMPLE_DATA`      | `false`          |
//! | `INVOICE_PREFIX`        | `TSI`            |
//! | `PAYMENT_TERMS_DAYS`    | `30`             |
//! | `GENERATOR_RULES_FILE`  | unset            |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Longest accepted `PAYMENT_TERMS_DAYS` (ten years).
pub const MAX_PAYMENT_TERMS_DAYS: i64 = 3650;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub use_persistent_stores: bool,
    pub database_url: Option<String>,
    /// Raw `LOG_FORMAT` value; interpreted by the observability crate.
    pub log_format: String,
    pub seed_sample_data: bool,
    pub invoice_prefix: String,
    pub payment_terms_days: i64,
    /// JSON file overriding the generator's keyword rules.
    pub rules_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            use_persistent_stores: false,
            database_url: None,
            log_format: "json".to_string(),
            seed_sample_data: false,
            invoice_prefix: "TSI".to_string(),
            payment_terms_days: 30,
            rules_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: raw,
            })?,
            None => defaults.bind_addr,
        };

        let use_persistent_stores = parse_flag(get("USE_PERSISTENT_STORES"));
        let database_url = get("DATABASE_URL");
        if use_persistent_stores && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let payment_terms_days = match get("PAYMENT_TERMS_DAYS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(days) if (0..=MAX_PAYMENT_TERMS_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "PAYMENT_TERMS_DAYS",
                        value: raw,
                    });
                }
            },
            None => defaults.payment_terms_days,
        };

        Ok(Self {
            bind_addr,
            use_persistent_stores,
            database_url,
            log_format: get("LOG_FORMAT").unwrap_or(defaults.log_format),
            seed_sample_data: parse_flag(get("SEED_SAMPLE_DATA")),
            invoice_prefix: get("INVOICE_PREFIX").unwrap_or(defaults.invoice_prefix),
            payment_terms_days,
            rules_file: get("GENERATOR_RULES_FILE").map(PathBuf::from),
        })
    }
}

fn parse_flag(raw: Option<String>) -> bool {
    raw.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
