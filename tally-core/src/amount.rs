//! Amount entry and display.
//!
//! Users type amounts the way they read them on a receipt: `250`, `1,250.50`,
//! `₹ 99.90`, `Rs. 40`. Anything that is not a plain positive decimal after
//! stripping the currency marker and thousands separators is rejected.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:₹|(?i:rs)\.?|(?i:inr)|\$)?\s*",
        r"(?P<sign>[+-])?",
        r"(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d*)?|\.\d+)$"
    ))
    .expect("amount pattern compiles")
});

/// Parse a user-entered amount. The result is always finite and > 0.
pub fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    let caps = AMOUNT_RE
        .captures(text)
        .ok_or_else(|| ValidationError::NonNumericAmount(text.to_string()))?;

    let value: f64 = caps["num"]
        .replace(',', "")
        .parse()
        .map_err(|_| ValidationError::NonNumericAmount(text.to_string()))?;

    let value = match caps.name("sign").map(|m| m.as_str()) {
        Some("-") => -value,
        _ => value,
    };

    if !value.is_finite() {
        return Err(ValidationError::NonFiniteAmount);
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(value));
    }
    Ok(value)
}

/// Two-decimal display with a currency symbol, e.g. `₹250.00`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    format!("{symbol}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_decorated_amounts() {
        assert_eq!(parse_amount("250").unwrap(), 250.0);
        assert_eq!(parse_amount(" 99.90 ").unwrap(), 99.9);
        assert_eq!(parse_amount("1,250.50").unwrap(), 1250.5);
        assert_eq!(parse_amount("₹ 40").unwrap(), 40.0);
        assert_eq!(parse_amount("Rs. 12.5").unwrap(), 12.5);
        assert_eq!(parse_amount("INR100").unwrap(), 100.0);
        assert_eq!(parse_amount(".75").unwrap(), 0.75);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(parse_amount("   "), Err(ValidationError::MissingAmount));
        assert_eq!(
            parse_amount("ten"),
            Err(ValidationError::NonNumericAmount("ten".to_string()))
        );
        assert!(matches!(
            parse_amount("12,34"),
            Err(ValidationError::NonNumericAmount(_))
        ));
        assert_eq!(parse_amount("0"), Err(ValidationError::NonPositiveAmount(0.0)));
        assert_eq!(
            parse_amount("-5"),
            Err(ValidationError::NonPositiveAmount(-5.0))
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(250.0, "₹"), "₹250.00");
        assert_eq!(format_amount(1234.5, "$"), "$1234.50");
    }
}
