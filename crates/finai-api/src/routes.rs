//! API Routes
//!
//! Route definitions for all API endpoints.

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create `/api` routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/transactions", transaction_routes())
        .route("/analyze", post(handlers::analyze::analyze_transactions))
        .route("/analyses", get(handlers::analyses::list_analyses))
}

/// Transaction routes
fn transaction_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route("/trends", get(handlers::transactions::transaction_trends))
        .route(
            "/:id",
            put(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
}

/// Status, health and OpenAPI routes
pub fn service_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health::service_status))
        .route("/health", get(handlers::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_document))
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}
