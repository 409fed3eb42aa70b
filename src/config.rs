//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Default column holding the service-level label
pub const DEFAULT_SERVICE_LEVEL_COLUMN: &str = "DOMESTIC AIR SERVICE LEVEL";

/// Default prefix of the per-carrier discount column (`CURRENT UPS`, ...)
pub const DEFAULT_DISCOUNT_COLUMN_PREFIX: &str = "CURRENT";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Contract data configuration
    pub contracts: ContractsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Contract data configuration
#[derive(Debug, Clone)]
pub struct ContractsConfig {
    /// Base directory containing one subdirectory per carrier
    pub data_dir: PathBuf,
    /// Header of the service-level label column
    pub service_level_column: String,
    /// Prefix of the discount column, followed by the upper-cased carrier
    pub discount_column_prefix: String,
}

impl ContractsConfig {
    /// Create a contract configuration rooted at `data_dir` with default column names
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            service_level_column: DEFAULT_SERVICE_LEVEL_COLUMN.to_string(),
            discount_column_prefix: DEFAULT_DISCOUNT_COLUMN_PREFIX.to_string(),
        }
    }

    /// Name of the discount column for a carrier, e.g. `CURRENT FEDEX`
    pub fn discount_column(&self, carrier: &str) -> String {
        format!("{} {}", self.discount_column_prefix, carrier.to_uppercase())
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            contracts: ContractsConfig {
                data_dir: env::var_os("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("clean")),
                service_level_column: env::var("SERVICE_LEVEL_COLUMN")
                    .unwrap_or_else(|_| DEFAULT_SERVICE_LEVEL_COLUMN.to_string()),
                discount_column_prefix: env::var("DISCOUNT_COLUMN_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_DISCOUNT_COLUMN_PREFIX.to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
