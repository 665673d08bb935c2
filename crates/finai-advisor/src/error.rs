//! Advisor error types

use finai_llm::LLMError;
use thiserror::Error;

/// Errors produced by the analysis pipeline
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("No transactions were sent for analysis")]
    NoTransactions,

    #[error("The AI did not generate a response")]
    EmptyResponse,

    #[error("Could not process the AI response: {reason}")]
    MalformedResponse {
        /// Provider text exactly as received
        raw: String,
        reason: String,
    },

    #[error("Provider error: {0}")]
    Provider(#[from] LLMError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
