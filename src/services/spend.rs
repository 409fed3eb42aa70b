//! Spend and discount parsing
//!
//! Contract files carry their annual spend in the filename (`$670K.csv`,
//! `$2.2M.csv`). This module turns that text into dollars, builds the
//! tolerance band used for filtering, and normalizes raw discount cells.

use crate::services::error::ContractError;

/// Extension shared by all contract files
pub const CONTRACT_EXTENSION: &str = ".csv";

/// Parse a spend string such as `$670K`, `$2.2M`, `$1,250,000` or `950000`
///
/// `$` and `,` are ignored. An `M` anywhere scales by one million, otherwise a
/// `K` scales by one thousand.
pub fn parse_spend(spend: &str) -> Result<f64, ContractError> {
    let cleaned: String = spend
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    let (number, multiplier) = if cleaned.contains('M') {
        (cleaned.replace('M', ""), 1_000_000.0)
    } else if cleaned.contains('K') {
        (cleaned.replace('K', ""), 1_000.0)
    } else {
        (cleaned, 1.0)
    };

    number
        .trim()
        .parse::<f64>()
        .map(|value| value * multiplier)
        .map_err(|_| ContractError::InvalidSpend(spend.to_string()))
}

/// Extract the spend text from a contract filename
///
/// Returns the non-empty text between a `$` and the first `.csv` after it,
/// or `None` when the filename does not follow the `$<amount>.csv` pattern.
/// `$670K.csv.csv` yields `670K`.
pub fn spend_text_from_filename(filename: &str) -> Option<&str> {
    if !filename.ends_with(CONTRACT_EXTENSION) {
        return None;
    }
    filename.match_indices('$').find_map(|(pos, _)| {
        let rest = &filename[pos + 1..];
        let first = rest.chars().next()?.len_utf8();
        rest[first..]
            .find(CONTRACT_EXTENSION)
            .map(|end| &rest[..first + end])
    })
}

/// Normalize a raw discount value
///
/// Values above 100 are assumed to have been stored pre-scaled (`4500` for
/// 45%) and are divided by 100. Everything else passes through.
pub fn normalize_discount(discount: f64) -> f64 {
    if discount > 100.0 {
        discount / 100.0
    } else {
        discount
    }
}

/// Inclusive spend band around a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendRange {
    /// Lowest spend included
    pub lower: f64,
    /// Highest spend included
    pub upper: f64,
}

impl SpendRange {
    /// Build `[target * (1 - tolerance), target * (1 + tolerance)]`
    pub fn around(target_spend: f64, tolerance: f64) -> Self {
        Self {
            lower: target_spend * (1.0 - tolerance),
            upper: target_spend * (1.0 + tolerance),
        }
    }

    /// Whether a spend falls inside the band
    pub fn contains(&self, spend: f64) -> bool {
        self.lower <= spend && spend <= self.upper
    }
}

/// Format a dollar amount with thousands separators, rounded to whole dollars
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
