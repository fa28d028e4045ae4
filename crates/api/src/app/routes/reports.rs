use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/stats", get(stats))
}

/// Totals over saved invoices carrying the configured number prefix.
pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.generator.stats().await {
        Ok(stats) => Json(serde_json::json!({
            "stats": dto::StatsView::from(stats),
            "message": "AI invoice statistics retrieved successfully",
        }))
        .into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}
