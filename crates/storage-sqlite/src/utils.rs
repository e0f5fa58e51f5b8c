//! Shared helpers for converting between SQLite TEXT columns and domain types.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Helper function to parse a string into a Decimal,
/// with a fallback for scientific notation by parsing as f64 first.
pub(crate) fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => {
            match f64::from_str(value_str) {
                Ok(f_val) => match Decimal::from_f64(f_val) {
                    Some(dec_val) => dec_val,
                    None => {
                        log::error!(
                            "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                            field_name,
                            value_str,
                            f_val
                        );
                        Decimal::ZERO
                    }
                },
                Err(e_f64) => {
                    log::error!(
                        "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                        field_name, value_str, e_decimal, e_f64
                    );
                    Decimal::ZERO
                }
            }
        }
    }
}

/// Parses an RFC 3339 timestamp column, falling back to the current time
/// when the stored value is malformed.
pub(crate) fn parse_timestamp_tolerant(value_str: &str, field_name: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value_str, e);
            Utc::now()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_plain() {
        assert_eq!(parse_decimal_string_tolerant("10000.00", "balance"), dec!(10000.00));
    }

    #[test]
    fn test_parse_decimal_scientific_notation() {
        assert_eq!(parse_decimal_string_tolerant("1e2", "balance"), dec!(100));
    }

    #[test]
    fn test_parse_decimal_garbage_falls_back_to_zero() {
        assert_eq!(parse_decimal_string_tolerant("not-a-number", "balance"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let parsed = parse_timestamp_tolerant("2025-07-10T00:00:00Z", "created_at");
        assert_eq!(parsed.to_rfc3339(), "2025-07-10T00:00:00+00:00");
    }
}
