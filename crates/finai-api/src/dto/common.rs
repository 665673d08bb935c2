//! Common DTO types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Largest history page a client may ask for
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Service status shown by the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub message: String,
    /// Always `"OK"`
    pub status: String,
    /// Provider label, `"demo"` when analyses are simulated
    pub mode: String,
    pub model: String,
    /// RFC 3339
    pub timestamp: String,
}

/// History query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Number of analyses to return
    pub limit: Option<usize>,
}

impl HistoryParams {
    /// Requested limit, falling back to `default` and clamped to a sane range
    pub fn clamped_limit(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_HISTORY_LIMIT)
    }
}
