//! API module
//!
//! Contains HTTP request handlers for the contract discount endpoints

pub mod analyze;
pub mod search;
pub mod status;
pub mod utils;

// Re-export handlers for convenience (used by main.rs)
pub use analyze::analyze_contracts;
pub use search::search_contracts;
pub use status::{health_check, welcome};
