//! Analysis Handler
//!
//! Runs the advisor over a batch of transactions and saves the result.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Analyze transactions
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "Analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis produced", body = AnalyzeResponse),
        (status = 400, description = "No transactions sent or an amount out of range", body = crate::error::ErrorResponse),
        (status = 500, description = "Provider failed or answered with invalid JSON", body = crate::error::ErrorResponse)
    )
)]
pub async fn analyze_transactions(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let outcome = state.advisor.analyze(&request.transactions).await?;

    let record = state.store.analyses.record(&outcome.analysis).await;
    tracing::info!(
        analysis_id = record.id,
        tokens_used = outcome.tokens_used,
        mode = %outcome.mode,
        "Analysis saved"
    );

    Ok(Json(AnalyzeResponse::from(outcome)))
}
