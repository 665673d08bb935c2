//! FinAI Storage Layer
//!
//! In-process persistence for transactions and the analysis history.
//!
//! # Repository Pattern
//!
//! Each record kind has its own repository behind an async `RwLock`.
//! Repositories are cheap to clone; clones share the same rows, so a
//! [`Store`] can be handed to every request handler.

pub mod config;
pub mod error;
pub mod repos;
pub mod sample;

use tracing::info;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use repos::*;

/// Repositories shared by the service
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub transactions: TransactionRepo,
    pub analyses: AnalysisRepo,
}

impl Store {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the dashboard's sample transactions
    pub async fn with_sample_data() -> StoreResult<Self> {
        Self::new().seeded().await
    }

    /// Build a store as configured
    pub async fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let store = Self {
            transactions: TransactionRepo::new(),
            analyses: AnalysisRepo::with_retention(config.analysis_retention),
        };
        if config.seed_sample_data {
            store.seeded().await
        } else {
            Ok(store)
        }
    }

    async fn seeded(self) -> StoreResult<Self> {
        for transaction in sample::sample_transactions() {
            self.transactions.create(transaction).await?;
        }
        info!(
            transactions = self.transactions.count().await,
            "Seeded sample transactions"
        );
        Ok(self)
    }

    /// Row counts per repository
    pub async fn health_check(&self) -> HealthStatus {
        HealthStatus {
            transactions: self.transactions.count().await,
            analyses: self.analyses.count().await,
        }
    }
}

/// Row counts reported by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub transactions: usize,
    pub analyses: usize,
}
