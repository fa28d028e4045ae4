use std::sync::Arc;

use anyhow::Context;

use sarthi_api::app::{build_app, services::AppServices};
use sarthi_infra::AppConfig;
use sarthi_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    sarthi_observability::init(LogFormat::from_setting(&config.log_format));

    let services = AppServices::from_config(&config)
        .await
        .context("failed to wire services")?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
