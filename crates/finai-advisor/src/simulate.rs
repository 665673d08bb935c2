//! Demo-mode analysis
//!
//! Fabricates the same JSON shape an LLM would return, computed from the
//! transactions with fixed ratios.

use finai_types::{
    format_money, round_cents, sum_amounts, Analysis, DuplicateGroup, Predictions, Transaction,
};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Growth applied to this period's spend to predict next month
pub const NEXT_MONTH_FACTOR: Decimal = dec!(1.05);

/// Share of subscription cost assumed recoverable
pub const SAVINGS_RATIO: Decimal = dec!(0.4);

/// Build a simulated analysis
pub fn simulate_analysis(transactions: &[Transaction]) -> Analysis {
    let subscriptions: Vec<&Transaction> =
        transactions.iter().filter(|t| t.is_subscription()).collect();

    // Batches posted to /api/analyze never pass through the store
    let total_spent = sum_amounts(transactions.iter().map(Transaction::abs_amount));
    let subscription_cost = sum_amounts(subscriptions.iter().map(|t| t.abs_amount()));
    let next_month = total_spent.saturating_mul(NEXT_MONTH_FACTOR);
    let savings = subscription_cost.saturating_mul(SAVINGS_RATIO);

    let savings_pct = if total_spent.is_zero() {
        Decimal::ZERO
    } else {
        savings
            .checked_div(total_spent)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .unwrap_or_default()
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    };

    let count = subscriptions.len() as u32;
    let group_name = if count > 2 {
        "Streaming services"
    } else {
        "Subscriptions"
    };

    Analysis {
        total_spent: format_money(total_spent),
        subscriptions: count,
        subscription_cost: format_money(subscription_cost),
        predictions: Predictions {
            next_month: format_money(next_month),
            savings: format_money(savings),
        },
        insights: vec![
            format!(
                "Detected {} active subscriptions costing ${}/month",
                count,
                format_money(subscription_cost)
            ),
            format!(
                "You could save {}% by cancelling services you don't use",
                savings_pct
            ),
            format!(
                "Your projected monthly spend is ${} if you keep this pace",
                format_money(next_month)
            ),
            "Review duplicated streaming and music subscriptions".to_string(),
        ],
        duplicates: vec![DuplicateGroup {
            name: group_name.to_string(),
            count,
            saving: round_cents(savings),
        }],
    }
}
