//! Contract search handler
//!
//! `POST /search_contracts/` ranks service levels by the best discount found
//! in contracts near the target spend, reporting best and worst discount with
//! the contract that produced each.

use crate::api::utils::run_scan;
use crate::error::AppError;
use crate::services::report::{format_search, SearchResponse};
use crate::services::{ContractError, SearchAggregator, SpendRange};
use crate::state::app_state::SharedState;
use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

/// Number of service levels returned when `top_n` is omitted
pub const DEFAULT_TOP_N: usize = 5;

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Request body for the contract search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Target spend in dollars
    pub target_spend: f64,
    /// Carrier directory and discount column, e.g. `FedEx`
    pub carrier: String,
    /// Fractional band around the target, e.g. `0.2`
    pub tolerance: f64,
    /// How many service levels to return
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// POST /search_contracts/ - Best and worst discount per service level
pub async fn search_contracts(
    State(state): State<SharedState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    info!(
        carrier = %request.carrier,
        target_spend = request.target_spend,
        tolerance = request.tolerance,
        top_n = request.top_n,
        "Searching contracts"
    );

    let range = SpendRange::around(request.target_spend, request.tolerance);
    let outcome = run_scan(&state, request.carrier, range, SearchAggregator::new())
        .await?
        .map_err(|e| match e {
            ContractError::CarrierNotFound(carrier) => AppError::CarrierNotFound(carrier),
            other => AppError::Contract(other),
        })?;

    Ok(Json(format_search(&outcome, request.top_n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContractsConfig;
    use crate::state::AppState;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn create_test_state() -> (TempDir, SharedState) {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let fedex = temp_dir.path().join("FedEx");
        fs::create_dir(&fedex).expect("Failed to create carrier dir");
        fs::write(
            fedex.join("$680K.csv"),
            "DOMESTIC AIR SERVICE LEVEL,CURRENT FEDEX\nPriority Overnight,50\nExpress Saver,30\n",
        )
        .expect("Failed to write contract");
        fs::write(
            fedex.join("$720K.csv"),
            "DOMESTIC AIR SERVICE LEVEL,CURRENT FEDEX\nPriority Overnight,46\nExpress Saver,3200\n",
        )
        .expect("Failed to write contract");

        let state = AppState::new(ContractsConfig::new(temp_dir.path())).shared();
        (temp_dir, state)
    }

    fn request(carrier: &str, top_n: usize) -> SearchRequest {
        SearchRequest {
            target_spend: 700_000.0,
            carrier: carrier.to_string(),
            tolerance: 0.2,
            top_n,
        }
    }

    #[tokio::test]
    async fn test_search_contracts_top_one() {
        let (_dir, state) = create_test_state();

        let Json(response) = search_contracts(State(state), Json(request("FedEx", 1)))
            .await
            .expect("Search should succeed");

        assert_eq!(response.top_services.len(), 1);
        let best = response.top_services.get("Priority Overnight").unwrap();
        assert_eq!(best.best, "50.000% ($680K.csv)");
        assert_eq!(best.worst, "46.000% ($720K.csv)");
        assert_eq!(response.range, "$560,000 - $840,000");
        assert_eq!(response.confidence, "Based on 2 matching contracts");
    }

    #[tokio::test]
    async fn test_search_contracts_normalizes_discounts() {
        let (_dir, state) = create_test_state();

        let Json(response) = search_contracts(State(state), Json(request("FedEx", 5)))
            .await
            .unwrap();

        let saver = response.top_services.get("Express Saver").unwrap();
        assert_eq!(saver.best, "32.000% ($720K.csv)");
        assert_eq!(saver.worst, "30.000% ($680K.csv)");
    }

    #[tokio::test]
    async fn test_search_contracts_missing_carrier_is_404() {
        let (_dir, state) = create_test_state();

        let result = search_contracts(State(state), Json(request("DHL", 3))).await;
        match result {
            Err(AppError::CarrierNotFound(carrier)) => assert_eq!(carrier, "DHL"),
            other => panic!("Expected CarrierNotFound error, got: {:?}", other.err()),
        }

        let (_dir, state) = create_test_state();
        let response = search_contracts(State(state), Json(request("DHL", 3)))
            .await
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_contracts_invalid_discount_is_500() {
        let (dir, state) = create_test_state();
        fs::write(
            dir.path().join("FedEx").join("$700K.csv"),
            "DOMESTIC AIR SERVICE LEVEL,CURRENT FEDEX\nPriority Overnight,TBD\n",
        )
        .unwrap();

        let error = search_contracts(State(state), Json(request("FedEx", 3)))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            AppError::Contract(ContractError::InvalidDiscount { .. })
        ));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_search_request_default_top_n() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"target_spend": 700000, "carrier": "UPS", "tolerance": 0.1}"#,
        )
        .unwrap();
        assert_eq!(request.top_n, DEFAULT_TOP_N);
    }
}
