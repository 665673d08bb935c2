//! Month-over-month spending trends

use std::collections::BTreeMap;

use finai_types::{round_cents, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Number of most recent months reported
pub const TREND_MONTHS: usize = 6;

/// Spend for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpending {
    /// `YYYY-MM`
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub average: Decimal,
}

/// Spend per month for a single category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    pub category: String,
    pub months: BTreeMap<String, f64>,
}

/// Latest month against the one before it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    pub current_month: String,
    pub previous_month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_total: Decimal,
    /// Percent change in total spend
    #[serde(with = "rust_decimal::serde::float")]
    pub change_pct: Decimal,
    /// Percent change in average transaction size
    #[serde(with = "rust_decimal::serde::float")]
    pub average_change_pct: Decimal,
    pub is_increasing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingTrends {
    /// Chronological, at most [`TREND_MONTHS`] entries
    pub monthly: Vec<MonthlySpending>,
    pub categories: Vec<CategoryTrend>,
    /// Absent with fewer than two months of data
    pub comparison: Option<MonthComparison>,
}

#[derive(Default)]
struct Bucket {
    total: Decimal,
    count: u32,
    categories: BTreeMap<String, Decimal>,
}

/// Group transactions by month and compare the latest two months
///
/// Amounts are counted by absolute value.
pub fn spending_trends(transactions: &[Transaction]) -> SpendingTrends {
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();
    for t in transactions {
        let bucket = buckets.entry(t.month_key()).or_default();
        let amount = t.abs_amount();
        bucket.total = bucket.total.saturating_add(amount);
        bucket.count += 1;
        let category = bucket.categories.entry(t.category.clone()).or_default();
        *category = category.saturating_add(amount);
    }

    let skip = buckets.len().saturating_sub(TREND_MONTHS);
    let recent: Vec<(String, Bucket)> = buckets.into_iter().skip(skip).collect();

    let monthly: Vec<MonthlySpending> = recent
        .iter()
        .map(|(month, bucket)| MonthlySpending {
            month: month.clone(),
            total: round_cents(bucket.total),
            count: bucket.count,
            average: if bucket.count == 0 {
                Decimal::ZERO
            } else {
                round_cents(bucket.total / Decimal::from(bucket.count))
            },
        })
        .collect();

    // Every category reports every month, 0 where nothing was spent
    let mut per_category: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for (_, bucket) in &recent {
        for category in bucket.categories.keys() {
            per_category.entry(category.clone()).or_insert_with(|| {
                recent.iter().map(|(month, _)| (month.clone(), 0.0)).collect()
            });
        }
    }
    for (month, bucket) in &recent {
        for (category, total) in &bucket.categories {
            if let Some(months) = per_category.get_mut(category) {
                months.insert(month.clone(), decimal_to_f64(round_cents(*total)));
            }
        }
    }
    let categories = per_category
        .into_iter()
        .map(|(category, months)| CategoryTrend { category, months })
        .collect();

    let comparison = match monthly.as_slice() {
        [.., previous, current] => {
            let change_pct = percent_change(previous.total, current.total);
            Some(MonthComparison {
                current_month: current.month.clone(),
                previous_month: previous.month.clone(),
                current_total: current.total,
                previous_total: previous.total,
                change_pct,
                average_change_pct: percent_change(previous.average, current.average),
                is_increasing: change_pct > Decimal::ZERO,
            })
        }
        _ => None,
    };

    SpendingTrends {
        monthly,
        categories,
        comparison,
    }
}

/// Percent change from `previous` to `current`, 0 when `previous` is 0
///
/// Saturates at `Decimal::MAX`/`MIN` when the ratio does not fit.
fn percent_change(previous: Decimal, current: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    let delta = current.saturating_sub(previous);
    match delta
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
    {
        Some(pct) => round_cents(pct),
        None if delta.is_sign_negative() != previous.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_f64().unwrap_or_default()
}
