//! FinAI Advisor - the financial analysis pipeline
//!
//! ```text
//! transactions ─→ prompt ─→ LLM provider ──┐
//!              └─→ demo simulation ────────┴─→ clean fences ─→ parse JSON ─→ AnalysisOutcome
//! ```
//!
//! The pipeline is stateless: every call to [`FinancialAdvisor::analyze`]
//! builds its own prompt and parses its own answer. Failures surface as
//! [`AdvisorError`], with the raw provider text attached whenever the model
//! answered something that is not a valid analysis.
//!
//! [`trends::spending_trends`] computes the month-by-month comparison shown
//! next to the analysis.

pub mod advisor;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod simulate;
pub mod trends;

pub use advisor::{AdvisorOptions, AnalysisOutcome, FinancialAdvisor};
pub use error::{AdvisorError, AdvisorResult};
pub use parse::{clean_response, parse_analysis};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use simulate::simulate_analysis;
pub use trends::{spending_trends, CategoryTrend, MonthComparison, MonthlySpending, SpendingTrends};
