//! Conversions from raw form text into typed column values.
//!
//! Only type coercion is checked here; no ranges are enforced.

use crate::error::CoreError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a quantity. Surrounding whitespace is ignored.
pub fn parse_quantity(raw: &str) -> Result<i32, CoreError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| CoreError::InvalidInput("quantity", raw.to_string()))
}

/// Parses a unit price. Accepts plain (`2.5`) and scientific (`2.5e1`) notation.
pub fn parse_price(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(|d| d.normalize())
        .map_err(|_| CoreError::InvalidInput("price", raw.to_string()))
}

/// Parses an optional star rating. An empty submission counts as no rating.
pub fn parse_rating(raw: Option<&str>) -> Result<Option<i32>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| CoreError::InvalidInput("rating", value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_signed_and_padded_integers() {
        assert_eq!(parse_quantity("10"), Ok(10));
        assert_eq!(parse_quantity(" 7 "), Ok(7));
        assert_eq!(parse_quantity("+3"), Ok(3));
    }

    #[test]
    fn quantity_rejects_non_integers() {
        assert!(parse_quantity("dez").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn price_keeps_submitted_digits() {
        assert_eq!(parse_price("2.5").unwrap().to_string(), "2.5");
        assert_eq!(parse_price("3").unwrap().to_string(), "3");
        assert_eq!(parse_price("1e2").unwrap().to_string(), "100");
    }

    #[test]
    fn price_rejects_garbage() {
        assert_eq!(
            parse_price("cheap"),
            Err(CoreError::InvalidInput("price", "cheap".to_string()))
        );
    }

    #[test]
    fn empty_rating_is_no_rating() {
        assert_eq!(parse_rating(None), Ok(None));
        assert_eq!(parse_rating(Some("")), Ok(None));
        assert_eq!(parse_rating(Some("4")), Ok(Some(4)));
        assert!(parse_rating(Some("four")).is_err());
    }
}
