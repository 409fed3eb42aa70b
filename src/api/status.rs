//! Service status handlers
//!
//! `GET /` greets clients and `GET /api/health` reports liveness and version.

use axum::Json;
use serde::Serialize;

/// Response for the root endpoint
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub status: String,
}

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

/// GET / - Welcome message
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Contract Analyzer API".to_string(),
        status: "ok".to_string(),
    })
}

/// GET /api/health - Health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Contract analyzer is healthy".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_welcome() {
        let Json(response) = welcome().await;
        assert_eq!(response.status, "ok");
        assert!(response.message.contains("Contract Analyzer"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
