//! Dashboard sample data

use chrono::NaiveDate;
use finai_types::NewTransaction;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SAMPLE: &[(&str, Decimal, &str, (i32, u32, u32))] = &[
    ("Netflix", dec!(-15.99), "Suscripción", (2026, 1, 1)),
    ("Spotify Premium", dec!(-9.99), "Suscripción", (2025, 12, 31)),
    ("Amazon Prime", dec!(-14.99), "Suscripción", (2025, 12, 30)),
    ("Supermercado", dec!(-85.50), "Comida", (2025, 12, 29)),
    ("Gasolina", dec!(-45.00), "Transporte", (2025, 12, 28)),
    ("Disney+", dec!(-10.99), "Suscripción", (2025, 12, 27)),
    ("Restaurante", dec!(-67.80), "Comida", (2025, 12, 26)),
    ("Apple Music", dec!(-10.99), "Suscripción", (2025, 12, 25)),
    ("Uber", dec!(-23.50), "Transporte", (2025, 12, 24)),
    ("HBO Max", dec!(-9.99), "Suscripción", (2025, 12, 23)),
];

/// The ten transactions the dashboard ships with, newest first
pub fn sample_transactions() -> Vec<NewTransaction> {
    SAMPLE
        .iter()
        .filter_map(|&(description, amount, category, (y, m, d))| {
            Some(NewTransaction {
                description: description.to_string(),
                amount,
                category: category.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}
