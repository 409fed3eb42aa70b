//! Contract statistics handler
//!
//! `POST /analyze_contracts/` returns a plain-text report with the average,
//! minimum and maximum discount of every service level found in contracts
//! near the target spend.

use crate::api::utils::run_scan;
use crate::error::AppError;
use crate::services::report::format_statistics;
use crate::services::{SpendRange, StatisticsAggregator};
use crate::state::app_state::SharedState;
use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

/// Request body for the statistics report
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Target spend in dollars
    pub target_spend: f64,
    /// Carrier directory and discount column, e.g. `UPS`
    pub carrier: String,
    /// Fractional band around the target, e.g. `0.2`
    pub tolerance: f64,
}

/// POST /analyze_contracts/ - Discount statistics per service level
pub async fn analyze_contracts(
    State(state): State<SharedState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<String, AppError> {
    info!(
        carrier = %request.carrier,
        target_spend = request.target_spend,
        tolerance = request.tolerance,
        "Analyzing contracts"
    );

    let range = SpendRange::around(request.target_spend, request.tolerance);
    let outcome = run_scan(&state, request.carrier, range, StatisticsAggregator::new()).await??;

    Ok(format_statistics(&outcome.summary))
}
