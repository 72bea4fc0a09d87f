//! SMIL clock values.
//!
//! Accepted forms, all converted to milliseconds:
//!
//! | Form            | Example      | Weight                   |
//! |-----------------|--------------|--------------------------|
//! | `<n>ms`         | `150ms`      | 1                        |
//! | `<n>s`          | `2s`         | 1000                     |
//! | `<n>min`        | `1min`       | 60000                    |
//! | `<n>h`          | `0.5h`       | 3600000                  |
//! | `mm:ss[.fff]`   | `01:30`      | 60000 / 1000             |
//! | `hh:mm:ss[.fff]`| `1:00:02.5`  | 3600000 / 60000 / 1000   |

use std::sync::LazyLock;

use regex::Regex;

use super::error::{Result, TranslateError};
use super::number::{format_number, parse_number};

/// `[hh:]mm:ss[.fff]`
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]+):)?([0-9]+):([0-9]+(?:\.[0-9]+)?)$").expect("clock pattern is valid")
});

/// Suffixes in the order they must be tried (`ms` before `s`).
const METRICS: [(&str, f64); 4] = [("ms", 1.0), ("s", 1000.0), ("min", 60000.0), ("h", 3600000.0)];

/// Convert a clock value to milliseconds.
pub fn clock_to_millis(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let unsupported = || TranslateError::unsupported(format!("dur value \"{text}\""));

    for (suffix, weight) in METRICS {
        if let Some(number) = trimmed.strip_suffix(suffix) {
            return parse_number(number)
                .map(|n| n * weight)
                .ok_or_else(unsupported);
        }
    }

    let caps = CLOCK_RE.captures(trimmed).ok_or_else(unsupported)?;
    let field = |index: usize| {
        caps.get(index)
            .and_then(|m| parse_number(m.as_str()))
            .unwrap_or(0.0)
    };
    let (hours, minutes, seconds) = (field(1), field(2), field(3));

    Ok(((hours * 60.0 + minutes) * 60.0 + seconds) * 1000.0)
}

/// Convert a clock value to a canonical millisecond string.
///
/// # Examples
///
/// - `parse_clock("2s")` -> `"2000"`
/// - `parse_clock("150ms")` -> `"150"`
/// - `parse_clock("1min")` -> `"60000"`
pub fn parse_clock(text: &str) -> Result<String> {
    clock_to_millis(text).map(format_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_suffixes() {
        assert_eq!(parse_clock("2s").unwrap(), "2000");
        assert_eq!(parse_clock("150ms").unwrap(), "150");
        assert_eq!(parse_clock("1min").unwrap(), "60000");
        assert_eq!(parse_clock("0.5h").unwrap(), "1800000");
        assert_eq!(parse_clock("0.25s").unwrap(), "250");
        assert_eq!(parse_clock(" 3s ").unwrap(), "3000");
    }

    #[test]
    fn test_colon_forms() {
        assert_eq!(parse_clock("01:30").unwrap(), "90000");
        assert_eq!(parse_clock("00:02.5").unwrap(), "2500");
        // hours / minutes / seconds weights
        assert_eq!(parse_clock("1:00:02").unwrap(), "3602000");
        assert_eq!(parse_clock("0:01:00.25").unwrap(), "60250");
    }

    #[test]
    fn test_rejects_unknown_forms() {
        for bad in ["", "5", "indefinite", "fast", "1:2:3:4", "xs", "1.2.3s", "2 days"] {
            let err = parse_clock(bad).unwrap_err();
            assert_eq!(
                err,
                TranslateError::UnsupportedFeature(format!("dur value \"{bad}\""))
            );
        }
    }

    #[test]
    fn test_canonical_roundtrip_is_stable() {
        for value in ["2s", "150ms", "1min", "01:30", "0.125s"] {
            let millis = parse_clock(value).unwrap();
            let again = parse_clock(&format!("{millis}ms")).unwrap();
            assert_eq!(millis, again);
        }
    }
}
