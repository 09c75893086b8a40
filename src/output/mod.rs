//! Output formatting module
//!
//! Handles:
//! - Byte humanization for the summary line
//! - Joining summary and performance data into the single plugin line

use crate::models::{EvaluationResult, PerfDatum};

/// Units indexed by power of 1024
const SIZE_UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Power-of-1024 unit index picked from the decimal digit count.
///
/// This is `(digits - 1) / 3`, not a logarithm, so e.g. 1000..1023 bytes
/// already land in kB. Existing dashboards parse this output.
pub fn size_unit_index(bytes: u128) -> usize {
    let digits = bytes.to_string().len();
    (digits - 1) / 3
}

/// Format a byte count as `"<value> <unit>"` with `decimals` places.
///
/// Ties round half away from zero (1152 bytes is `1.13 kB`), unlike the
/// round-half-to-even of `{:.2}`. An index past the unit table leaves the
/// unit empty.
pub fn humanize_bytes(bytes: u128, decimals: usize) -> String {
    let index = size_unit_index(bytes);
    let value = bytes as f64 / 1024f64.powi(index as i32);
    let unit = SIZE_UNITS.get(index).copied().unwrap_or("");
    format!("{:.*} {}", decimals, round_half_up(value, decimals), unit)
}

fn round_half_up(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Render the complete plugin line
pub fn render(result: &EvaluationResult) -> String {
    if result.perf_data.is_empty() {
        return result.summary.clone();
    }

    format!("{}| {}", result.summary, render_perf_data(&result.perf_data))
}

/// Space separated performance data
pub fn render_perf_data(perf_data: &[PerfDatum]) -> String {
    perf_data
        .iter()
        .map(|datum| datum.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
