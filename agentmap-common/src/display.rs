//! Display formatting for commercial metrics

use crate::Record;

/// Placeholder shown for missing metrics
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a revenue figure given in millions
///
/// - `>= 1000` → `$X.YB+`
/// - `>= 1` → `$NM+`
/// - otherwise the raw figure, `$0.5`
///
/// Non-finite input formats as an empty string.
///
/// # Examples
/// ```
/// use agentmap_common::display::format_arr_from_million;
///
/// assert_eq!(format_arr_from_million(1500.0), "$1.5B+");
/// assert_eq!(format_arr_from_million(12.4), "$12M+");
/// assert_eq!(format_arr_from_million(0.5), "$0.5");
/// ```
pub fn format_arr_from_million(million: f64) -> String {
    if !million.is_finite() {
        return String::new();
    }
    if million >= 1000.0 {
        // Halves round up
        format!("${:.1}B+", (million / 100.0).round() / 10.0)
    } else if million >= 1.0 {
        format!("${:.0}M+", million.round())
    } else {
        format!("${}", million)
    }
}

/// ARR text shown on cards and in the detail view
///
/// `arrProductMillion` takes precedence over the free-text `arr`.
pub fn display_arr(record: &Record) -> String {
    match record.arr_product_million {
        Some(m) if m.is_finite() => format_arr_from_million(m),
        _ if !record.arr.trim().is_empty() => record.arr.clone(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// MAU text shown on cards and in the detail view
pub fn display_mau(record: &Record) -> String {
    if record.mau.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        record.mau.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_billions() {
        assert_eq!(format_arr_from_million(1000.0), "$1.0B+");
        assert_eq!(format_arr_from_million(3300.0), "$3.3B+");
    }

    #[test]
    fn test_format_rounds_half_up() {
        assert_eq!(format_arr_from_million(2.5), "$3M+");
        assert_eq!(format_arr_from_million(1250.0), "$1.3B+");
        assert_eq!(format_arr_from_million(1240.0), "$1.2B+");
    }

    #[test]
    fn test_format_millions_and_below() {
        assert_eq!(format_arr_from_million(1.0), "$1M+");
        assert_eq!(format_arr_from_million(999.0), "$999M+");
        assert_eq!(format_arr_from_million(0.25), "$0.25");
        assert_eq!(format_arr_from_million(f64::NAN), "");
    }

    #[test]
    fn test_display_arr_precedence() {
        let mut record = Record {
            arr: "$5M".to_string(),
            arr_product_million: Some(40.0),
            ..Default::default()
        };
        assert_eq!(display_arr(&record), "$40M+");

        record.arr_product_million = None;
        assert_eq!(display_arr(&record), "$5M");

        record.arr.clear();
        assert_eq!(display_arr(&record), "N/A");
    }

    #[test]
    fn test_display_mau() {
        let mut record = Record::default();
        assert_eq!(display_mau(&record), "N/A");
        record.mau = "2.3M".to_string();
        assert_eq!(display_mau(&record), "2.3M");
    }
}
