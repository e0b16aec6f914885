//! Numeric magnitude extraction from free-form price strings.

/// Extracts a number from a display price such as `"$1,234.56"` or
/// `"CA$ 15.50 total"`.
///
/// Every character that is not an ASCII digit or `.` is discarded and the
/// remainder parsed as `f64`. Returns `None` when nothing numeric remains or
/// the remainder is not a valid number (e.g. `"1.2.3"`). Callers must treat
/// `None` as "exclude from comparisons", never as zero.
#[must_use]
pub fn parse_amount(display: &str) -> Option<f64> {
    let digits: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}
