//! Revenue sort value
//!
//! Unit-normalized (millions) proxy for annual recurring revenue. Malformed
//! text is not an error; it maps to [`NO_REVENUE`], which sorts below every
//! real figure including zero.

use agentmap_common::Record;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for missing or unparseable revenue
pub const NO_REVENUE: f64 = -1.0;

/// Optional `$`, a decimal number, optional `B`/`M`/`K` unit directly after it
static ARR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$?(\d+(?:\.\d+)?|\.\d+)([BMK])?")
        .expect("ARR pattern is a valid regex")
});

/// Parse free-text ARR into millions
///
/// # Examples
/// ```
/// use agentmap_browse::revenue::parse_arr_value;
///
/// assert_eq!(parse_arr_value("$12M"), 12.0);
/// assert_eq!(parse_arr_value("$1.5B"), 1500.0);
/// assert_eq!(parse_arr_value("N/A"), -1.0);
/// ```
pub fn parse_arr_value(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() || text == "N/A" {
        return NO_REVENUE;
    }

    let Some(caps) = ARR_PATTERN.captures(text) else {
        return NO_REVENUE;
    };
    let Ok(amount) = caps[1].parse::<f64>() else {
        return NO_REVENUE;
    };

    let millions = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(unit) if unit == "B" => amount * 1000.0,
        Some(unit) if unit == "K" => amount / 1000.0,
        _ => amount,
    };

    if millions.is_finite() {
        millions
    } else {
        NO_REVENUE
    }
}

/// Revenue sort value for a record
///
/// `arrProductMillion` wins when it is a finite number; otherwise `arr` is
/// parsed textually.
pub fn revenue_sort_value(record: &Record) -> f64 {
    match record.arr_product_million {
        Some(m) if m.is_finite() => m,
        _ => parse_arr_value(&record.arr),
    }
}
