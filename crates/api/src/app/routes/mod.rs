use axum::Router;

pub mod generation;
pub mod pricing;
pub mod reports;
pub mod system;

/// Router for the invoice generation endpoints.
pub fn router() -> Router {
    let ai_invoices = Router::new()
        .merge(generation::router())
        .merge(pricing::router())
        .merge(reports::router());

    Router::new().nest("/ai/invoices", ai_invoices)
}
