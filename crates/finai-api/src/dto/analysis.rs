//! Analysis DTOs

use finai_advisor::AnalysisOutcome;
use finai_types::{is_amount_in_range, Analysis, AnalysisRecord, Transaction};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::transaction::validate_amount;

/// Batch of transactions to analyze
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AnalyzeRequest {
    /// A missing list is treated like an empty one
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    #[validate(custom(function = "validate_batch_amounts"))]
    pub transactions: Vec<Transaction>,
}

fn validate_batch_amounts(transactions: &[Transaction]) -> Result<(), ValidationError> {
    match transactions.iter().find(|t| !is_amount_in_range(t.amount)) {
        Some(t) => validate_amount(&t.amount),
        None => Ok(()),
    }
}

/// Analysis result with provider metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub analysis: Analysis,
    /// Tokens billed by the provider, 0 in demo mode
    pub tokens_used: u32,
    /// Provider label, `"demo"` when simulated
    pub mode: String,
    pub model: String,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            success: true,
            analysis: outcome.analysis,
            tokens_used: outcome.tokens_used,
            mode: outcome.mode,
            model: outcome.model,
        }
    }
}

/// Saved analyses, newest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisHistoryResponse {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub analyses: Vec<AnalysisRecord>,
}
