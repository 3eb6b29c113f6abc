//! Display formatting for table cells

/// Ratings below this value are highlighted in the table
pub const LOW_RATING_THRESHOLD: f64 = 3.0;

/// Format a price the way the admin table shows it
///
/// Two decimals, a comma as the decimal separator and a space between
/// thousands: `48652.0` becomes `"48 652,00"`.
#[must_use]
pub fn format_price_rub(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped},{frac}")
}

/// Format a rating as `"4.5/5"`
#[must_use]
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}/5")
}

/// Whether a rating should be flagged as poor
#[must_use]
pub fn is_low_rating(rating: f64) -> bool {
    rating < LOW_RATING_THRESHOLD
}

/// Cell text for an optional value, `-` when missing
#[must_use]
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
