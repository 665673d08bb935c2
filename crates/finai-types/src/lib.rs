//! FinAI Types - Domain records shared by every FinAI crate
//!
//! This crate has zero dependencies on other finai crates. It defines:
//!
//! - [`Transaction`] and [`NewTransaction`]: ledger entries entered by the user
//! - [`Analysis`]: the financial analysis produced by an LLM or by the demo simulation
//! - [`AnalysisRecord`]: a saved analysis in the history
//! - Money helpers for the two-decimal text amounts used in analyses
//!
//! All records serialize with camelCase field names, which is the wire format
//! the dashboard speaks.

pub mod analysis;
pub mod money;
pub mod transaction;

pub use analysis::*;
pub use money::*;
pub use transaction::*;
