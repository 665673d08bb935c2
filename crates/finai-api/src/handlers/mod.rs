//! API Handlers
//!
//! Request handlers for all API endpoints.
//! Each module handles a specific domain.

pub mod analyses;
pub mod analyze;
pub mod health;
pub mod transactions;

pub use health::*;
