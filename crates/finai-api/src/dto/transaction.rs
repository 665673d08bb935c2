//! Transaction DTOs

use chrono::NaiveDate;
use finai_advisor::SpendingTrends;
use finai_types::{is_amount_in_range, NewTransaction, Transaction, MAX_ABS_AMOUNT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Create or replace a transaction
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Merchant or free-text description
    #[validate(length(min = 1, max = 200, message = "description must be 1-200 characters"))]
    pub description: String,
    /// Signed amount, expenses are negative
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 50, message = "category must be 1-50 characters"))]
    pub category: String,
    /// Booking date, `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Reject amounts beyond [`MAX_ABS_AMOUNT`]
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if is_amount_in_range(*amount) {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message(Cow::Owned(format!(
            "amount must be between -{0} and {0}",
            MAX_ABS_AMOUNT
        ))))
    }
}

impl From<TransactionRequest> for NewTransaction {
    fn from(req: TransactionRequest) -> Self {
        Self {
            description: req.description.trim().to_string(),
            amount: req.amount,
            category: req.category.trim().to_string(),
            date: req.date,
        }
    }
}

/// A single transaction
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub transaction: Transaction,
}

impl TransactionResponse {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            success: true,
            transaction,
        }
    }
}

/// All transactions, newest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionListResponse {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub transactions: Vec<Transaction>,
}

/// Month-over-month spending
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrendsResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub trends: SpendingTrends,
}
