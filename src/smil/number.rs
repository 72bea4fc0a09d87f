//! Canonical number formatting.

/// Render a float with the fewest digits that round-trip.
///
/// Integral values drop the fractional part, negative zero prints as `0`,
/// and no exponent is used for the magnitudes produced here
/// (milliseconds, percentages, ratios).
///
/// # Examples
///
/// - `format_number(2000.0)` -> `"2000"`
/// - `format_number(0.5)` -> `"0.5"`
/// - `format_number(2.5)` -> `"2.5"`
#[inline]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    // f64 Display is shortest round-trip and never switches to exponent form
    value.to_string()
}

/// Render a key time fraction as a percentage without the `%` sign.
///
/// Scaling by 100 is rounded to 9 decimal places so that `0.2` prints
/// as `20` rather than `20.000000000000004`.
pub fn format_percentage(fraction: f64) -> String {
    const SCALE: f64 = 1e9;
    format_number((fraction * 100.0 * SCALE).round() / SCALE)
}

/// Parse a decimal number the way SMIL attributes spell them.
///
/// Leading/trailing whitespace is ignored; `inf`/`nan` spellings are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let valid = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !valid {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
