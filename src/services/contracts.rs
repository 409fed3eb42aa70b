//! Contract directory scanning
//!
//! Lists a carrier's contract files, keeps those whose filename spend falls
//! inside the requested band, and streams their rows into an aggregator.

use crate::config::ContractsConfig;
use crate::services::aggregator::DiscountAggregator;
use crate::services::error::ContractError;
use crate::services::spend::{
    parse_spend, spend_text_from_filename, SpendRange, CONTRACT_EXTENSION,
};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// A contract file whose spend has been parsed from its name
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFile {
    /// Filename, e.g. `$670K.csv`
    pub filename: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Spend in dollars
    pub spend: f64,
}

/// One service-level row of a contract
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRow {
    /// Service-level label
    pub service_level: String,
    /// Discount cell exactly as found in the file (trimmed)
    pub raw_discount: String,
}

/// Result of running an aggregator over the matching contracts
#[derive(Debug, Clone)]
pub struct ScanOutcome<T> {
    /// Spend band used for filtering
    pub range: SpendRange,
    /// Number of contract files inside the band
    pub contract_count: usize,
    /// Aggregator output
    pub summary: T,
}

/// Reads contract files for a carrier
pub struct ContractScanner<'a> {
    config: &'a ContractsConfig,
}

impl<'a> ContractScanner<'a> {
    /// Create a scanner over the configured data directory
    pub fn new(config: &'a ContractsConfig) -> Self {
        Self { config }
    }

    /// Resolve the directory holding a carrier's contracts
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Existing carrier directory
    /// * `Err(ContractError)` - If the name is unusable or the directory is missing
    pub fn carrier_dir(&self, carrier: &str) -> Result<PathBuf, ContractError> {
        if carrier.is_empty()
            || carrier == "."
            || carrier.contains("..")
            || carrier.contains('/')
            || carrier.contains('\\')
        {
            return Err(ContractError::InvalidCarrier(carrier.to_string()));
        }

        let dir = self.config.data_dir.join(carrier);
        if !dir.is_dir() {
            return Err(ContractError::CarrierNotFound(carrier.to_string()));
        }
        Ok(dir)
    }

    /// List the carrier's contracts whose spend lies inside `range`
    ///
    /// Files are returned in filename order. Files without a `$<amount>`
    /// marker are ignored; a marker that does not parse is an error.
    pub fn matching_contracts(
        &self,
        carrier: &str,
        range: &SpendRange,
    ) -> Result<Vec<ContractFile>, ContractError> {
        let dir = self.carrier_dir(carrier)?;
        let io_err = |source: std::io::Error| ContractError::Io {
            path: dir.clone(),
            source,
        };

        let mut filenames = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            // follows symlinks, unlike DirEntry::file_type
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.ends_with(CONTRACT_EXTENSION) => filenames.push(name),
                _ => {}
            }
        }
        filenames.sort();

        let mut matching = Vec::new();
        for filename in filenames {
            let Some(spend_text) = spend_text_from_filename(&filename) else {
                debug!(file = %filename, "Skipping file without spend marker");
                continue;
            };
            let spend = parse_spend(spend_text)?;
            if range.contains(spend) {
                matching.push(ContractFile {
                    path: dir.join(&filename),
                    filename,
                    spend,
                });
            } else {
                debug!(file = %filename, spend, "Contract outside spend range");
            }
        }

        info!(
            carrier = %carrier,
            lower = range.lower,
            upper = range.upper,
            matched = matching.len(),
            "Scanned carrier contracts"
        );
        Ok(matching)
    }

    /// Read the service-level rows of one contract
    pub fn read_rows(
        &self,
        contract: &ContractFile,
        carrier: &str,
    ) -> Result<Vec<ContractRow>, ContractError> {
        let csv_err = |source: csv::Error| ContractError::Csv {
            file: contract.filename.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&contract.path)
            .map_err(csv_err)?;

        let headers = reader.headers().map_err(csv_err)?.clone();
        let discount_column = self.config.discount_column(carrier);
        let label_idx = column_index(&headers, &self.config.service_level_column, contract)?;
        let discount_idx = column_index(&headers, &discount_column, contract)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let service_level = record.get(label_idx).unwrap_or_default();
            if service_level.is_empty() {
                continue;
            }
            rows.push(ContractRow {
                service_level: service_level.to_string(),
                raw_discount: record.get(discount_idx).unwrap_or_default().to_string(),
            });
        }
        Ok(rows)
    }

    /// Feed every row of every matching contract into `aggregator`
    pub fn scan<A: DiscountAggregator>(
        &self,
        carrier: &str,
        range: SpendRange,
        mut aggregator: A,
    ) -> Result<ScanOutcome<A::Output>, ContractError> {
        let contracts = self.matching_contracts(carrier, &range)?;
        for contract in &contracts {
            for row in self.read_rows(contract, carrier)? {
                aggregator.observe(contract, &row)?;
            }
        }

        Ok(ScanOutcome {
            range,
            contract_count: contracts.len(),
            summary: aggregator.finish(),
        })
    }
}

fn column_index(
    headers: &csv::StringRecord,
    column: &str,
    contract: &ContractFile,
) -> Result<usize, ContractError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ContractError::MissingColumn {
            file: contract.filename.clone(),
            column: column.to_string(),
        })
}
