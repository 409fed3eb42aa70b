//! Report formatting
//!
//! Turns aggregated discounts into the two response shapes: a plain-text
//! statistics report and a ranked JSON summary of extremes.

use crate::services::aggregator::{DiscountExtreme, ServiceExtremes, ServiceLevelStats};
use crate::services::contracts::ScanOutcome;
use crate::services::spend::format_dollars;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

fn percent(value: f64) -> String {
    format!("{:.3}%", value)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Render per-service statistics as a text report, highest average first
///
/// Every service block starts with a blank line. No statistics yields an
/// empty string.
pub fn format_statistics(stats: &[ServiceLevelStats]) -> String {
    let mut ranked: Vec<&ServiceLevelStats> = stats.iter().collect();
    ranked.sort_by(|a, b| descending(a.avg_discount, b.avg_discount));

    let mut lines = Vec::with_capacity(ranked.len() * 6);
    for stat in ranked {
        let values: Vec<String> = stat.discount_values.iter().map(|v| percent(*v)).collect();
        lines.push(format!("\nService Level: {}", stat.service_level));
        lines.push(format!("Average Discount: {}", percent(stat.avg_discount)));
        lines.push(format!("Min Discount: {}", percent(stat.min_discount)));
        lines.push(format!("Max Discount: {}", percent(stat.max_discount)));
        lines.push(format!("Contract Count: {}", stat.contract_count));
        lines.push(format!("Discount Values: {}", values.join(", ")));
    }
    lines.join("\n")
}

/// Human-readable best and worst discount of one service level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    /// Best discount with its contract, e.g. `50.000% ($700K.csv)`
    pub best: String,
    /// Worst discount with its contract
    pub worst: String,
}

impl From<&ServiceExtremes> for ServiceSummary {
    fn from(extremes: &ServiceExtremes) -> Self {
        fn describe(extreme: &DiscountExtreme) -> String {
            format!("{} ({})", percent(extreme.value), extreme.filename)
        }
        Self {
            best: describe(&extremes.best),
            worst: describe(&extremes.worst),
        }
    }
}

/// Ranked service summaries, serialized as a JSON object in rank order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopServices(pub Vec<(String, ServiceSummary)>);

impl TopServices {
    /// Number of ranked services
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no service matched
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Summary for a service level, if ranked
    pub fn get(&self, service_level: &str) -> Option<&ServiceSummary> {
        self.0
            .iter()
            .find(|(label, _)| label == service_level)
            .map(|(_, summary)| summary)
    }
}

impl Serialize for TopServices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, summary) in &self.0 {
            map.serialize_entry(label, summary)?;
        }
        map.end()
    }
}

/// Response body of the contract search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Spend band searched, e.g. `$560,000 - $840,000`
    pub range: String,
    /// How many contracts back the figures
    pub confidence: String,
    /// Services ranked by best discount
    pub top_services: TopServices,
}

/// Rank services by best discount and keep the first `top_n`
pub fn format_search(
    outcome: &ScanOutcome<Vec<(String, ServiceExtremes)>>,
    top_n: usize,
) -> SearchResponse {
    let mut ranked: Vec<&(String, ServiceExtremes)> = outcome.summary.iter().collect();
    ranked.sort_by(|a, b| descending(a.1.best.value, b.1.best.value));

    let top_services = ranked
        .into_iter()
        .take(top_n)
        .map(|(label, extremes)| (label.clone(), ServiceSummary::from(extremes)))
        .collect();

    SearchResponse {
        range: format!(
            "{} - {}",
            format_dollars(outcome.range.lower),
            format_dollars(outcome.range.upper)
        ),
        confidence: format!("Based on {} matching contracts", outcome.contract_count),
        top_services: TopServices(top_services),
    }
}
