//! Display collation for labels and names
//!
//! Compares case-folded text first, then raw code points, so the order is
//! total and deterministic. Latin text sorts ahead of CJK text, matching
//! the display locale's default collation for mixed names.

use std::cmp::Ordering;

/// Locale-aware comparison used for names, countries and categories
pub fn compare(left: &str, right: &str) -> Ordering {
    let folded_left = left.chars().flat_map(char::to_lowercase);
    let folded_right = right.chars().flat_map(char::to_lowercase);
    folded_left
        .cmp(folded_right)
        .then_with(|| left.cmp(right))
}

/// Sort strings in place by [`compare`]
pub fn sort_strings(values: &mut [String]) {
    values.sort_by(|a, b| compare(a, b));
}
