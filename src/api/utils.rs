//! API utility functions
//!
//! Helpers shared by the contract handlers.

use crate::error::AppError;
use crate::services::{
    ContractError, ContractScanner, DiscountAggregator, ScanOutcome, SpendRange,
};
use crate::state::app_state::SharedState;
use std::sync::Arc;

/// Run the contract pipeline on the blocking thread pool
///
/// The outer `Result` reports a failed task, the inner one the pipeline
/// result so callers can map contract errors to their own status codes.
///
/// # Arguments
/// * `state` - Application state holding the contract configuration
/// * `carrier` - Carrier directory to scan
/// * `range` - Spend band to keep
/// * `aggregator` - Aggregator fed with every matching row
pub async fn run_scan<A>(
    state: &SharedState,
    carrier: String,
    range: SpendRange,
    aggregator: A,
) -> Result<Result<ScanOutcome<A::Output>, ContractError>, AppError>
where
    A: DiscountAggregator + Send + 'static,
    A::Output: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        ContractScanner::new(&state.contracts).scan(&carrier, range, aggregator)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Contract scan task failed: {}", e)))
}
