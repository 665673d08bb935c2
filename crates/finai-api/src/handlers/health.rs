//! Status and Health Check Handlers

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::dto::StatusResponse;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process answers
    pub status: String,
    /// Service version
    pub version: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Stored transactions
    pub transactions: usize,
    /// Saved analyses
    pub analyses: usize,
}

/// Service status endpoint
///
/// Reports whether analyses go to a provider or are simulated.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = StatusResponse)
    )
)]
pub async fn service_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "FinAI Server is running!".to_string(),
        status: "OK".to_string(),
        mode: state.advisor.mode().to_string(),
        model: state.advisor.model().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.store.health_check().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().timestamp_millis(),
        transactions: health.transactions,
        analyses: health.analyses,
    })
}
