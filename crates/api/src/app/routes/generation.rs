use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use sarthi_ai::{GenerateInvoice, PricingMode};
use sarthi_core::OrderId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/suggestions/:order_id", get(get_suggestions))
        .route("/generate/:order_id", post(generate_invoice))
        .route("/bulk-generate", post(bulk_generate))
        .route("/analyze-order/:order_id", get(analyze_order))
}

pub async fn get_suggestions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(order_id): Path<String>,
) -> axum::response::Response {
    let order_id = match errors::parse_order_id(&order_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .generator
        .suggestions(order_id, Utc::now().date_naive())
        .await
    {
        Ok(suggestions) => Json(serde_json::json!({
            "suggestions": dto::SuggestionsView::from(&suggestions),
            "message": "AI invoice suggestions generated successfully",
        }))
        .into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

pub async fn generate_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(order_id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let order_id = match errors::parse_order_id(&order_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    // Only an absent body falls back to the defaults.
    let req = if body.trim_ascii().is_empty() {
        dto::GenerateInvoiceRequest::default()
    } else {
        match serde_json::from_slice::<dto::GenerateInvoiceRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.to_string());
            }
        }
    };
    let generator = &services.generator;

    if req.save_to_db {
        if let Err(e) = generator.ensure_not_invoiced(order_id).await {
            return errors::ai_error_to_response(e);
        }
    }

    let cmd = GenerateInvoice::new(
        order_id,
        PricingMode::from_auto_calculate(req.auto_calculate),
        Utc::now(),
    );
    let invoice = match generator.generate(&cmd).await {
        Ok(invoice) => invoice,
        Err(e) => return errors::ai_error_to_response(e),
    };

    let (saved_invoice_id, save_error) = if req.save_to_db {
        match generator.persist(&invoice).await {
            Ok(record) => (Some(record.id), None),
            Err(e) => (None, Some(dto::ErrorView::from(&e))),
        }
    } else {
        (None, None)
    };

    let body = dto::GenerateInvoiceResponse {
        generated_invoice: dto::GeneratedInvoiceView::from(&invoice),
        saved_invoice_id,
        save_error,
        message: "AI invoice generated successfully",
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub async fn bulk_generate(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::BulkGenerateRequest>, JsonRejection>,
) -> axum::response::Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };
    let Some(raw_ids) = req.order_ids else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", "order_ids is required");
    };

    let mut order_ids: Vec<OrderId> = Vec::with_capacity(raw_ids.len());
    let mut failures: Vec<dto::BulkFailureView> = Vec::new();
    for raw in &raw_ids {
        match raw.parse::<OrderId>() {
            Ok(id) => order_ids.push(id),
            Err(_) => failures.push(dto::BulkFailureView::unparsable(raw)),
        }
    }

    let outcome = services
        .generator
        .bulk_generate(
            &order_ids,
            PricingMode::from_auto_calculate(req.auto_calculate),
            Utc::now(),
            req.save_to_db,
        )
        .await;

    let generated_count = outcome.generated.len();
    failures.extend(outcome.failures.iter().map(dto::BulkFailureView::from));
    let body = dto::BulkGenerateResponse {
        generated_count,
        saved_count: outcome.saved.len(),
        generated_invoices: outcome
            .generated
            .iter()
            .map(|inv| dto::BulkInvoiceView {
                order_id: inv.order_id,
                invoice_number: inv.invoice_number.clone(),
                total_amount: inv.total_amount,
                customer_name: inv.customer_name.clone(),
            })
            .collect(),
        failures,
        message: format!("Successfully generated {generated_count} AI invoices"),
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub async fn analyze_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(order_id): Path<String>,
) -> axum::response::Response {
    let order_id = match errors::parse_order_id(&order_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.generator.analyze_order(order_id).await {
        Ok(report) => Json(dto::AnalyzeOrderResponse::from(report)).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}
