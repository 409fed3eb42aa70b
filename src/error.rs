//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::services::ContractError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// No contract directory exists for the requested carrier
    #[error("Carrier not found: {0}")]
    CarrierNotFound(String),

    /// Contract scanning or aggregation failed
    #[error("{0}")]
    Contract(#[from] ContractError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::CarrierNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Contract(ContractError::InvalidCarrier(_)) => StatusCode::BAD_REQUEST,
            AppError::Contract(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %error_message, "Request failed");
        }

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_not_found_is_404() {
        let response = AppError::CarrierNotFound("DHL".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_contract_errors_are_500() {
        let error = AppError::from(ContractError::CarrierNotFound("DHL".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = AppError::from(ContractError::InvalidSpend("abc".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_carrier_is_400() {
        let error = AppError::from(ContractError::InvalidCarrier("../etc".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_contract_error_message_is_preserved() {
        let error = AppError::from(ContractError::InvalidSpend("12abc".to_string()));
        assert_eq!(error.to_string(), "Invalid spend amount: 12abc");
    }
}
