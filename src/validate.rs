//! Normalization of raw command-line values.
//!
//! Every check returns `None` for absent or invalid input; callers decide the
//! fallback. Zero is an ordinary value here, never a marker.

use std::ops::RangeInclusive;

use crate::pattern::Pattern;

fn parse_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

/// The value if it parses as an integer and is one of `allowed`.
pub fn clamp_to_set(raw: &str, allowed: &[u32]) -> Option<u32> {
    let n = u32::try_from(parse_int(raw)?).ok()?;
    allowed.contains(&n).then_some(n)
}

/// The value if it parses as an integer `>= 0`.
pub fn non_negative_int(raw: &str) -> Option<u64> {
    u64::try_from(parse_int(raw)?).ok()
}

/// The value if it parses as an integer inside `range`.
pub fn bounded_int(raw: &str, range: RangeInclusive<u64>) -> Option<u64> {
    non_negative_int(raw).filter(|n| range.contains(n))
}

/// Alphabet and row-length check for a seed pattern. Empty text is not well formed.
pub fn is_well_formed_pattern(text: &str, max_columns: usize) -> bool {
    match Pattern::parse(text) {
        Ok(pattern) => !text.is_empty() && pattern.width() <= max_columns,
        Err(_) => false,
    }
}
