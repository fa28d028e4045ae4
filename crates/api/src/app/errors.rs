use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sarthi_ai::AiError;
use sarthi_core::{OrderId, StoreError};

pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    match &err {
        AiError::OrderNotFound(_) | AiError::CustomerNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, err.code(), err.to_string())
        }
        AiError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, err.code(), msg.clone()),
        AiError::Degenerate(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, err.code(), msg.clone())
        }
        AiError::InvoiceExists {
            order_id,
            invoice_number,
        } => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "error": err.code(),
                "message": "Invoice already exists for this order",
                "order_id": order_id,
                "invoice_number": invoice_number,
            })),
        )
            .into_response(),
        AiError::Store(StoreError::Conflict(msg)) => {
            json_error(StatusCode::CONFLICT, "conflict", msg.clone())
        }
        AiError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, err.code(), e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_order_id(raw: &str) -> Result<OrderId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("invalid order id {raw:?}")))
}
