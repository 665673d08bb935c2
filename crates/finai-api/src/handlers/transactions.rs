//! Transaction Handlers
//!
//! CRUD over the stored transactions plus the monthly trend summary.

use axum::{extract::State, http::StatusCode, Json};
use finai_advisor::spending_trends;
use std::sync::Arc;

use crate::dto::{TransactionListResponse, TransactionRequest, TransactionResponse, TrendsResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiPath, ValidatedJson};
use crate::state::AppState;

/// List transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    responses(
        (status = 200, description = "Transactions, newest first", body = TransactionListResponse)
    )
)]
pub async fn list_transactions(State(state): State<Arc<AppState>>) -> Json<TransactionListResponse> {
    Json(TransactionListResponse {
        success: true,
        transactions: state.store.transactions.list().await,
    })
}

/// Create a transaction
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let transaction = state.store.transactions.create(request.into()).await?;

    tracing::info!(
        id = transaction.id,
        category = %transaction.category,
        "Transaction created"
    );

    Ok((StatusCode::CREATED, Json(TransactionResponse::new(transaction))))
}

/// Replace a transaction
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = i64, Path, description = "Transaction ID")),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Transaction not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<TransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    let transaction = state.store.transactions.update(id, request.into()).await?;

    tracing::info!(id, "Transaction updated");

    Ok(Json(TransactionResponse::new(transaction)))
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = i64, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Removed transaction", body = TransactionResponse),
        (status = 400, description = "Invalid transaction ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Transaction not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<TransactionResponse>> {
    let transaction = state.store.transactions.delete(id).await.map_err(|e| {
        tracing::warn!(id, "Delete of unknown transaction");
        ApiError::from(e)
    })?;

    tracing::info!(id, "Transaction deleted");

    Ok(Json(TransactionResponse::new(transaction)))
}

/// Monthly spending trends over the stored transactions
#[utoipa::path(
    get,
    path = "/api/transactions/trends",
    tag = "Transactions",
    responses(
        (status = 200, description = "Monthly totals and comparison", body = TrendsResponse)
    )
)]
pub async fn transaction_trends(State(state): State<Arc<AppState>>) -> Json<TrendsResponse> {
    let transactions = state.store.transactions.list().await;

    Json(TrendsResponse {
        success: true,
        trends: spending_trends(&transactions),
    })
}
