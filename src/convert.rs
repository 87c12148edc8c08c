//! This mainly concerns converting store records into the strings the
//! view slots actually display.

use concat_string::concat_string;

use crate::store::UpdateStatus;

/// Formats the current temperature with its unit suffix, e.g. `"72°F"`.
/// There is no separator; the unit string carries any symbol itself.
pub fn current_temp_text(temp: i32, unit: &str) -> String {
    concat_string!(temp.to_string(), unit)
}

/// Formats the high/low pair as `"{high}/{low}{unit}"`, or `None` when
/// either bound is missing (the slot is hidden in that case).
pub fn high_low_text(high: Option<i32>, low: Option<i32>, unit: &str) -> Option<String> {
    match (high, low) {
        (Some(high), Some(low)) => Some(concat_string!(
            high.to_string(),
            "/",
            low.to_string(),
            unit
        )),
        _ => None,
    }
}

/// The terse inline marker shown when the last refresh failed.
pub fn status_marker(status: UpdateStatus) -> &'static str {
    match status {
        UpdateStatus::Success => "",
        UpdateStatus::Failure => "*",
    }
}
