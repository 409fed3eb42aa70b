//! Contract pipeline error types
//!
//! Errors raised while scanning a carrier directory, parsing filenames
//! and reading contract CSV files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning and aggregating contracts
#[derive(Error, Debug)]
pub enum ContractError {
    /// Spend text taken from a filename is not a number
    #[error("Invalid spend amount: {0}")]
    InvalidSpend(String),

    /// Carrier name cannot be used as a directory name
    #[error("Invalid carrier name: {0:?}")]
    InvalidCarrier(String),

    /// Carrier directory does not exist under the data directory
    #[error("Carrier directory not found: {0}")]
    CarrierNotFound(String),

    /// A contract file lacks a required column
    #[error("Column '{column}' missing from {file}")]
    MissingColumn {
        /// Contract filename
        file: String,
        /// Header that was expected
        column: String,
    },

    /// A discount cell could not be read as a number
    #[error("Invalid discount '{value}' for '{service_level}' in {file}")]
    InvalidDiscount {
        /// Contract filename
        file: String,
        /// Row label
        service_level: String,
        /// Raw cell contents
        value: String,
    },

    /// Filesystem failure while listing or opening contracts
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("Failed to parse {file}: {source}")]
    Csv {
        /// Contract filename
        file: String,
        /// Underlying error
        #[source]
        source: csv::Error,
    },
}
