//! Number formatting shared by the log layer and the report.

use num_format::{Locale, ToFormattedString};

/// Formats `value` with `decimals` places and thousands separators.
///
/// Non-finite values are printed as Rust prints them.
pub(crate) fn grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let whole = match whole.parse::<u64>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => whole.to_string(),
    };
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{sign}{whole}.{fraction}"),
        None => format!("{sign}{whole}"),
    }
}
