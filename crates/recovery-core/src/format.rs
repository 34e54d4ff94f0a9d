//! Display helpers for model outputs.
//!
//! Durations are broken into 365-day years and 30-day months; numbers get
//! a separator every three digits of the integer part.

use std::fmt;

use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: u32 = 365;
const DAYS_PER_MONTH: u32 = 30;

/// A day count split into whole years, whole months and leftover days.
///
/// `years * 365 + months * 30 + days` always equals the original count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl DurationBreakdown {
    pub fn from_days(total: u32) -> Self {
        let within_year = total % DAYS_PER_YEAR;
        Self {
            years: total / DAYS_PER_YEAR,
            months: within_year / DAYS_PER_MONTH,
            days: within_year % DAYS_PER_MONTH,
        }
    }

    #[cfg(test)]
    fn total_days(&self) -> u32 {
        self.years * DAYS_PER_YEAR + self.months * DAYS_PER_MONTH + self.days
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

impl fmt::Display for DurationBreakdown {
    /// Renders only non-zero parts, e.g. `1 year, 1 month`. Zero renders as `0 days`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0 days");
        }
        let parts: Vec<String> = [(self.years, "year"), (self.months, "month"), (self.days, "day")]
            .into_iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, unit)| plural(count, unit))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Render `days` as years, months and days, e.g. `1 year, 1 month`.
pub fn format_duration_breakdown(days: u32) -> String {
    DurationBreakdown::from_days(days).to_string()
}

/// Insert `separator` between every group of three integer digits.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Format `number` with `separator` between thousands.
///
/// The sign stays in front and any fractional part is kept unseparated.
/// Non-finite values use the standard `NaN`/`inf` rendering.
pub fn format_with_separator(number: f64, separator: &str) -> String {
    if !number.is_finite() {
        return number.to_string();
    }
    let rendered = number.abs().to_string();
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::new();
    if number.is_sign_negative() && number != 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(integer, separator));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format `number` with a comma every three digits, e.g. `1,234,567`.
pub fn format_with_thousands_separator(number: f64) -> String {
    format_with_separator(number, ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_single_day() {
        assert_eq!(format_duration_breakdown(1), "1 day");
    }

    #[test]
    fn test_breakdown_omits_zero_parts() {
        assert_eq!(format_duration_breakdown(180), "6 months");
        assert_eq!(format_duration_breakdown(395), "1 year, 1 month");
        assert_eq!(format_duration_breakdown(365), "1 year");
        assert_eq!(format_duration_breakdown(45), "1 month, 15 days");
    }

    #[test]
    fn test_breakdown_all_parts_plural() {
        assert_eq!(format_duration_breakdown(2 * 365 + 2 * 30 + 2), "2 years, 2 months, 2 days");
        assert_eq!(format_duration_breakdown(400), "1 year, 1 month, 5 days");
    }

    #[test]
    fn test_breakdown_zero_days() {
        assert!(DurationBreakdown::from_days(0).is_zero());
        assert_eq!(format_duration_breakdown(0), "0 days");
    }

    #[test]
    fn test_breakdown_recomposes() {
        for total in 0..=800 {
            assert_eq!(DurationBreakdown::from_days(total).total_days(), total);
        }
    }

    #[test]
    fn test_separator_integers() {
        assert_eq!(format_with_thousands_separator(1_234_567.0), "1,234,567");
        assert_eq!(format_with_thousands_separator(999.0), "999");
        assert_eq!(format_with_thousands_separator(1000.0), "1,000");
        assert_eq!(format_with_thousands_separator(0.0), "0");
        assert_eq!(format_with_thousands_separator(847_931.0), "847,931");
    }

    #[test]
    fn test_separator_sign_and_fraction() {
        assert_eq!(format_with_thousands_separator(-1234.5), "-1,234.5");
        assert_eq!(format_with_thousands_separator(1234.5678), "1,234.5678");
        assert_eq!(format_with_thousands_separator(-0.0), "0");
    }

    #[test]
    fn test_separator_non_finite() {
        assert_eq!(format_with_thousands_separator(f64::NAN), "NaN");
        assert_eq!(format_with_thousands_separator(f64::INFINITY), "inf");
        assert_eq!(format_with_thousands_separator(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(format_with_separator(1_234_567.0, " "), "1 234 567");
        assert_eq!(format_with_separator(1_234_567.0, "."), "1.234.567");
        assert_eq!(
            format_with_separator(12_833_055_803_133_884_000.0, ","),
            "12,833,055,803,133,884,000"
        );
    }
}
