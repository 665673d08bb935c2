//! Storage configuration

use serde::{Deserialize, Serialize};

use crate::repos::DEFAULT_ANALYSIS_RETENTION;

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seed the dashboard's sample transactions on startup
    pub seed_sample_data: bool,
    /// Analyses returned by the history endpoint
    pub history_limit: usize,
    /// Analyses kept in memory; older ones are dropped
    pub analysis_retention: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            history_limit: 10,
            analysis_retention: DEFAULT_ANALYSIS_RETENTION,
        }
    }
}
