//! Money formatting and lenient parsing
//!
//! Analyses carry amounts as text ("123.45"). The simulation formats them
//! with two decimals; LLM output is parsed back leniently because models
//! like to add currency symbols and thousands separators.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Round to cents, half away from zero
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly two decimals
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_cents(value))
}

/// Sum amounts, saturating at the `Decimal` bounds instead of panicking
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Parse a money string such as `"$1,234.50"` or `" 12 "`
///
/// Returns `None` when no number can be recovered.
pub fn parse_money(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Serde helper: accept a JSON string or a JSON number and keep it as text
pub mod text_or_number {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        })
    }
}

/// Serde helper: accept a count as an integer, a whole float (`6.0`) or
/// numeric text (`"6"`)
pub mod lenient_count {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Raw::deserialize(deserializer)? {
            Raw::Number(number) => match number.as_u64() {
                Some(n) => Some(n as f64),
                None => number.as_f64(),
            },
            Raw::Text(text) => text.trim().parse::<f64>().ok(),
        };

        match value {
            Some(v) if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
            _ => Err(D::Error::custom("expected a non-negative whole number")),
        }
    }
}
