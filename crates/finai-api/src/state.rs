//! Application state shared across handlers

use std::sync::Arc;

use finai_advisor::FinancialAdvisor;
use finai_store::Store;

/// Analyses returned by the history endpoint unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Shared application state
pub struct AppState {
    /// Transaction and analysis repositories
    pub store: Store,
    /// Analysis pipeline
    pub advisor: Arc<FinancialAdvisor>,
    /// Maximum analyses listed by the history endpoint
    pub history_limit: usize,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Store, advisor: Arc<FinancialAdvisor>) -> Self {
        Self {
            store,
            advisor,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// State in demo mode without artificial latency, for tests and local runs
    pub fn demo(store: Store) -> Self {
        Self::new(store, Arc::new(FinancialAdvisor::simulated()))
    }
}
