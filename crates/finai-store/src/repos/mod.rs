//! Repository implementations

mod analysis;
mod transaction;

pub use analysis::{AnalysisRepo, DEFAULT_ANALYSIS_RETENTION};
pub use transaction::TransactionRepo;
