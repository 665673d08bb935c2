//! API error handling
//!
//! Every failure is answered with `{ "error": <message>, "details": <text> }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finai_advisor::AdvisorError;
use finai_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("The AI did not generate a response")]
    EmptyAiResponse,

    #[error("Could not process the AI response")]
    MalformedAiResponse { raw: String },

    #[error("Error analyzing transactions")]
    AnalysisFailed { details: String },

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyAiResponse
            | Self::MalformedAiResponse { .. }
            | Self::AnalysisFailed { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra text returned to the client for debugging
    pub fn details(&self) -> Option<String> {
        match self {
            Self::MalformedAiResponse { raw } => Some(raw.clone()),
            Self::AnalysisFailed { details } => Some(details.clone()),
            _ => None,
        }
    }
}

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Raw provider output or underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            details: err.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref cause) = self {
            tracing::error!(cause = %cause, "Internal error");
        }

        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::NoTransactions => Self::BadRequest(err.to_string()),
            AdvisorError::EmptyResponse => Self::EmptyAiResponse,
            AdvisorError::MalformedResponse { raw, .. } => Self::MalformedAiResponse { raw },
            AdvisorError::Provider(e) => {
                tracing::error!(error = %e, "Analysis failed");
                Self::AnalysisFailed {
                    details: e.to_string(),
                }
            }
            AdvisorError::Serialization(details) => Self::AnalysisFailed { details },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::InvalidInput(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid")
                    )
                })
            })
            .collect();
        Self::ValidationError(messages.join(", "))
    }
}
