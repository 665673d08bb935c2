//! Data Transfer Objects
//!
//! Request and response structures for the API. Successful responses are
//! wrapped in a `{ "success": true, ... }` envelope.

pub mod analysis;
pub mod common;
pub mod transaction;

pub use analysis::*;
pub use common::*;
pub use transaction::*;
