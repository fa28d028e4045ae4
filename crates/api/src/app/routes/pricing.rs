use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use sarthi_ai::{LineItem, invoice_templates, pricing};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/smart-pricing", post(smart_pricing))
        .route("/templates", get(templates))
}

pub async fn smart_pricing(
    payload: Result<Json<dto::SmartPricingRequest>, JsonRejection>,
) -> axum::response::Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };
    let Some(raw_items) = req.items else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", "items is required");
    };

    let items: Vec<LineItem> = match raw_items
        .into_iter()
        .map(dto::PricingItemRequest::into_line_item)
        .collect()
    {
        Ok(items) => items,
        Err(e) => return errors::ai_error_to_response(e),
    };

    let view = dto::PricingView::new(pricing::calculate(&items), pricing::tax_breakdown(&items));
    Json(serde_json::json!({
        "pricing": view,
        "message": "Smart pricing calculated successfully",
    }))
    .into_response()
}

pub async fn templates() -> impl IntoResponse {
    Json(serde_json::json!({
        "templates": invoice_templates(),
        "message": "Invoice templates retrieved successfully",
    }))
}
