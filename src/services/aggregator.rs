//! Discount aggregation
//!
//! The scanner feeds every row of every matching contract into a
//! [`DiscountAggregator`]. Two aggregators exist: one collecting full
//! statistics per service level, one tracking only the best and worst
//! discount along with the contract that produced it.

use crate::services::contracts::{ContractFile, ContractRow};
use crate::services::error::ContractError;
use crate::services::spend::normalize_discount;
use std::collections::HashMap;

/// Consumes contract rows and produces a summary
pub trait DiscountAggregator {
    /// Summary produced once all rows are observed
    type Output;

    /// Record one row of a matching contract
    fn observe(&mut self, file: &ContractFile, row: &ContractRow) -> Result<(), ContractError>;

    /// Consume the aggregator and produce its summary
    fn finish(self) -> Self::Output;
}

/// Per-label storage that keeps labels in first-seen order
#[derive(Debug)]
struct LabelTable<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T> Default for LabelTable<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> LabelTable<T> {
    fn get_mut(&mut self, label: &str) -> Option<&mut T> {
        let idx = *self.index.get(label)?;
        Some(&mut self.entries[idx].1)
    }

    fn insert(&mut self, label: &str, value: T) {
        self.index.insert(label.to_string(), self.entries.len());
        self.entries.push((label.to_string(), value));
    }
}

fn parse_discount(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    // NaN stands for an empty cell, never a discount
    (!value.is_nan()).then_some(value)
}

/// Descriptive statistics for one service level
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceLevelStats {
    /// Service-level label
    pub service_level: String,
    /// Mean of all contributing discounts
    pub avg_discount: f64,
    /// Smallest discount
    pub min_discount: f64,
    /// Largest discount
    pub max_discount: f64,
    /// Number of contributing discounts
    pub contract_count: usize,
    /// Contributing discounts in ascending order
    pub discount_values: Vec<f64>,
}

impl ServiceLevelStats {
    fn from_values(service_level: String, mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let count = values.len();
        let sum: f64 = values.iter().sum();
        Some(Self {
            service_level,
            avg_discount: sum / count as f64,
            min_discount: values[0],
            max_discount: values[count - 1],
            contract_count: count,
            discount_values: values,
        })
    }
}

/// Collects every valid discount per service level
///
/// Cells that are empty or not numeric are skipped.
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    discounts: LabelTable<Vec<f64>>,
    skipped_rows: usize,
}

impl StatisticsAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows skipped so far because of an unreadable discount
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

impl DiscountAggregator for StatisticsAggregator {
    type Output = Vec<ServiceLevelStats>;

    fn observe(&mut self, file: &ContractFile, row: &ContractRow) -> Result<(), ContractError> {
        let Some(raw) = parse_discount(&row.raw_discount) else {
            tracing::debug!(
                file = %file.filename,
                service_level = %row.service_level,
                value = %row.raw_discount,
                "Skipping unreadable discount"
            );
            self.skipped_rows += 1;
            return Ok(());
        };

        let discount = normalize_discount(raw);
        match self.discounts.get_mut(&row.service_level) {
            Some(values) => values.push(discount),
            None => self.discounts.insert(&row.service_level, vec![discount]),
        }
        Ok(())
    }

    fn finish(self) -> Self::Output {
        if self.skipped_rows > 0 {
            tracing::debug!(skipped_rows = self.skipped_rows, "Discount rows skipped");
        }
        self.discounts
            .entries
            .into_iter()
            .filter_map(|(label, values)| ServiceLevelStats::from_values(label, values))
            .collect()
    }
}

/// A discount together with the contract that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountExtreme {
    /// Normalized discount value
    pub value: f64,
    /// Contract filename
    pub filename: String,
}

/// Best and worst discount seen for one service level
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceExtremes {
    /// Highest discount
    pub best: DiscountExtreme,
    /// Lowest discount
    pub worst: DiscountExtreme,
}

/// Tracks the best and worst discount per service level
///
/// Any unreadable discount aborts aggregation.
#[derive(Debug, Default)]
pub struct SearchAggregator {
    extremes: LabelTable<ServiceExtremes>,
}

impl SearchAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiscountAggregator for SearchAggregator {
    type Output = Vec<(String, ServiceExtremes)>;

    fn observe(&mut self, file: &ContractFile, row: &ContractRow) -> Result<(), ContractError> {
        let raw =
            parse_discount(&row.raw_discount).ok_or_else(|| ContractError::InvalidDiscount {
                file: file.filename.clone(),
                service_level: row.service_level.clone(),
                value: row.raw_discount.clone(),
            })?;

        let discount = normalize_discount(raw);
        let seen = DiscountExtreme {
            value: discount,
            filename: file.filename.clone(),
        };

        match self.extremes.get_mut(&row.service_level) {
            Some(current) => {
                if discount > current.best.value {
                    current.best = seen.clone();
                }
                if discount < current.worst.value {
                    current.worst = seen;
                }
            }
            None => self.extremes.insert(
                &row.service_level,
                ServiceExtremes {
                    best: seen.clone(),
                    worst: seen,
                },
            ),
        }
        Ok(())
    }

    fn finish(self) -> Self::Output {
        self.extremes.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn contract(filename: &str) -> ContractFile {
        ContractFile {
            filename: filename.to_string(),
            path: PathBuf::from(filename),
            spend: 700_000.0,
        }
    }

    fn row(service_level: &str, raw_discount: &str) -> ContractRow {
        ContractRow {
            service_level: service_level.to_string(),
            raw_discount: raw_discount.to_string(),
        }
    }

    #[test]
    fn test_statistics_basic() {
        let file = contract("$700K.csv");
        let mut aggregator = StatisticsAggregator::new();
        for value in ["44", "40", "42"] {
            aggregator.observe(&file, &row("Next Day Air", value)).unwrap();
        }

        let stats = aggregator.finish();
        assert_eq!(stats.len(), 1);
        let stat = &stats[0];
        assert_eq!(stat.service_level, "Next Day Air");
        assert_eq!(stat.avg_discount, 42.0);
        assert_eq!(stat.min_discount, 40.0);
        assert_eq!(stat.max_discount, 44.0);
        assert_eq!(stat.contract_count, 3);
        assert_eq!(stat.discount_values, vec![40.0, 42.0, 44.0]);
    }

    #[test]
    fn test_statistics_skips_invalid_and_normalizes() {
        let file = contract("$700K.csv");
        let mut aggregator = StatisticsAggregator::new();
        aggregator.observe(&file, &row("Ground", "n/a")).unwrap();
        aggregator.observe(&file, &row("Ground", "")).unwrap();
        aggregator.observe(&file, &row("Ground", "4500")).unwrap();
        aggregator.observe(&file, &row("Saver", "--")).unwrap();
        assert_eq!(aggregator.skipped_rows(), 3);

        let stats = aggregator.finish();
        // "Saver" never received a valid value
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].discount_values, vec![45.0]);
    }

    #[test]
    fn test_statistics_keeps_first_seen_order() {
        let file = contract("$700K.csv");
        let mut aggregator = StatisticsAggregator::new();
        aggregator.observe(&file, &row("B", "10")).unwrap();
        aggregator.observe(&file, &row("A", "20")).unwrap();
        aggregator.observe(&file, &row("B", "30")).unwrap();

        let labels: Vec<_> = aggregator
            .finish()
            .into_iter()
            .map(|s| s.service_level)
            .collect();
        assert_eq!(labels, vec!["B", "A"]);
    }

    #[test]
    fn test_search_tracks_extremes_with_filename() {
        let mut aggregator = SearchAggregator::new();
        aggregator
            .observe(&contract("$650K.csv"), &row("Next Day Air", "40"))
            .unwrap();
        aggregator
            .observe(&contract("$700K.csv"), &row("Next Day Air", "55"))
            .unwrap();
        aggregator
            .observe(&contract("$750K.csv"), &row("Next Day Air", "3500"))
            .unwrap();

        let extremes = aggregator.finish();
        assert_eq!(extremes.len(), 1);
        let (label, found) = &extremes[0];
        assert_eq!(label, "Next Day Air");
        assert_eq!(found.best.value, 55.0);
        assert_eq!(found.best.filename, "$700K.csv");
        assert_eq!(found.worst.value, 35.0);
        assert_eq!(found.worst.filename, "$750K.csv");
    }

    #[test]
    fn test_search_ties_keep_first_contract() {
        let mut aggregator = SearchAggregator::new();
        aggregator
            .observe(&contract("$650K.csv"), &row("Ground", "30"))
            .unwrap();
        aggregator
            .observe(&contract("$700K.csv"), &row("Ground", "30"))
            .unwrap();

        let extremes = aggregator.finish();
        assert_eq!(extremes[0].1.best.filename, "$650K.csv");
        assert_eq!(extremes[0].1.worst.filename, "$650K.csv");
    }

    #[test]
    fn test_search_rejects_invalid_discount() {
        let mut aggregator = SearchAggregator::new();
        let result = aggregator.observe(&contract("$700K.csv"), &row("Ground", "n/a"));
        match result {
            Err(ContractError::InvalidDiscount {
                file,
                service_level,
                value,
            }) => {
                assert_eq!(file, "$700K.csv");
                assert_eq!(service_level, "Ground");
                assert_eq!(value, "n/a");
            }
            other => panic!("Expected InvalidDiscount error, got: {:?}", other),
        }
    }
}
