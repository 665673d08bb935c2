//! Financial analysis records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{lenient_count, parse_money, text_or_number};

/// Summary derived from a batch of transactions
///
/// This is the JSON object the LLM is asked to produce. Money fields are text
/// on the wire; numbers are accepted on input and kept as their textual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Total spent over the batch
    #[serde(deserialize_with = "text_or_number::deserialize")]
    pub total_spent: String,
    /// Number of subscriptions found
    #[serde(deserialize_with = "lenient_count::deserialize")]
    pub subscriptions: u32,
    /// Total cost of those subscriptions
    #[serde(deserialize_with = "text_or_number::deserialize")]
    pub subscription_cost: String,
    pub predictions: Predictions,
    /// Short actionable insights (four are requested)
    pub insights: Vec<String>,
    /// Groups of duplicated services
    #[serde(default)]
    pub duplicates: Vec<DuplicateGroup>,
}

/// Forward-looking figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    /// Predicted spend for next month
    #[serde(deserialize_with = "text_or_number::deserialize")]
    pub next_month: String,
    /// Estimated potential savings
    #[serde(deserialize_with = "text_or_number::deserialize")]
    pub savings: String,
}

/// A group of services that overlap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub name: String,
    #[serde(deserialize_with = "lenient_count::deserialize")]
    pub count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub saving: Decimal,
}

/// A saved analysis in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    pub subscriptions: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings_potential: Decimal,
    pub created_at: DateTime<Utc>,
    pub insights: Vec<String>,
    pub duplicates: Vec<DuplicateGroup>,
}

impl AnalysisRecord {
    /// Flatten an analysis into a history row
    ///
    /// Text amounts that cannot be parsed are stored as zero.
    pub fn from_analysis(id: i64, analysis: &Analysis, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            total_spent: parse_money(&analysis.total_spent).unwrap_or_default(),
            subscriptions: analysis.subscriptions,
            savings_potential: parse_money(&analysis.predictions.savings).unwrap_or_default(),
            created_at,
            insights: analysis.insights.clone(),
            duplicates: analysis.duplicates.clone(),
        }
    }
}
