//! Analysis history repository

use std::sync::Arc;

use chrono::Utc;
use finai_types::{Analysis, AnalysisRecord};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<AnalysisRecord>,
}

/// Analyses kept in memory unless configured otherwise
pub const DEFAULT_ANALYSIS_RETENTION: usize = 100;

/// Saved analyses, append-only; the oldest are dropped past the retention cap
#[derive(Debug, Clone)]
pub struct AnalysisRepo {
    table: Arc<RwLock<Table>>,
    retention: usize,
}

impl Default for AnalysisRepo {
    fn default() -> Self {
        Self::with_retention(DEFAULT_ANALYSIS_RETENTION)
    }
}

impl AnalysisRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `retention` analyses (at least one)
    pub fn with_retention(retention: usize) -> Self {
        Self {
            table: Arc::default(),
            retention: retention.max(1),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Store an analysis, stamped with the current time
    pub async fn record(&self, analysis: &Analysis) -> AnalysisRecord {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let record = AnalysisRecord::from_analysis(table.next_id, analysis, Utc::now());
        table.rows.push(record.clone());

        let excess = table.rows.len().saturating_sub(self.retention);
        if excess > 0 {
            table.rows.drain(..excess);
            tracing::debug!(dropped = excess, "Oldest analyses dropped");
        }

        tracing::debug!(id = record.id, "Analysis recorded");
        record
    }

    /// Up to `limit` analyses, newest first
    pub async fn recent(&self, limit: usize) -> Vec<AnalysisRecord> {
        let table = self.table.read().await;
        table.rows.iter().rev().take(limit).cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}
