//! Analysis History Handlers

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::dto::{AnalysisHistoryResponse, HistoryParams};
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// Saved analyses, newest first
#[utoipa::path(
    get,
    path = "/api/analyses",
    tag = "Analysis",
    params(HistoryParams),
    responses(
        (status = 200, description = "Analysis history", body = AnalysisHistoryResponse),
        (status = 400, description = "Invalid query string", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_analyses(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<HistoryParams>,
) -> Json<AnalysisHistoryResponse> {
    let limit = params.clamped_limit(state.history_limit);

    Json(AnalysisHistoryResponse {
        success: true,
        analyses: state.store.analyses.recent(limit).await,
    })
}
