//! Transaction records
//!
//! A transaction is one ledger entry: a dated, described, categorized,
//! signed amount. Expenses are negative.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Category labels that mark a recurring subscription
///
/// The dashboard's sample data is in Spanish, so both spellings are accepted.
pub const SUBSCRIPTION_CATEGORIES: &[&str] = &["suscripción", "suscripcion", "subscription"];

/// Largest magnitude accepted for a single transaction amount
pub const MAX_ABS_AMOUNT: Decimal = dec!(1000000000000);

/// Whether `amount` is within [`MAX_ABS_AMOUNT`] in either direction
pub fn is_amount_in_range(amount: Decimal) -> bool {
    amount.abs() <= MAX_ABS_AMOUNT
}

/// One financial ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Identifier (assigned by the store; client-side batches may use any value)
    #[serde(default)]
    pub id: i64,
    /// Booking date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text description, e.g. merchant name
    pub description: String,
    /// Signed amount
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Category label
    pub category: String,
}

impl Transaction {
    /// Build a stored transaction from its payload
    pub fn from_new(id: i64, new: NewTransaction) -> Self {
        Self {
            id,
            date: new.date,
            description: new.description,
            amount: new.amount,
            category: new.category,
        }
    }

    /// Whether this transaction belongs to the subscription category
    pub fn is_subscription(&self) -> bool {
        is_subscription_category(&self.category)
    }

    /// Magnitude of the amount regardless of sign
    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// Calendar month bucket, formatted `YYYY-MM`
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Check a category label against [`SUBSCRIPTION_CATEGORIES`]
pub fn is_subscription_category(category: &str) -> bool {
    let normalized = category.trim().to_lowercase();
    SUBSCRIPTION_CATEGORIES.contains(&normalized.as_str())
}

/// Payload for creating or replacing a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}
