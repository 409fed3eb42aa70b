//! Service layer for business logic
//!
//! The contract pipeline lives here, separate from the HTTP handlers:
//! spend parsing, directory scanning, aggregation and report formatting.

pub mod aggregator;
pub mod contracts;
pub mod error;
pub mod report;
pub mod spend;

pub use aggregator::{DiscountAggregator, SearchAggregator, StatisticsAggregator};
pub use contracts::{ContractScanner, ScanOutcome};
pub use error::ContractError;
pub use spend::SpendRange;
