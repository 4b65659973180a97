//! Field validators shared by request payloads.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

/// ISO 4217 shaped currency code: three upper-case ASCII letters.
pub static CURRENCY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency pattern"));

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Amounts such as prices and totals may be zero but never negative.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(failure("non_negative", "must not be negative"));
    }
    Ok(())
}

/// Requested quantities must be strictly positive.
pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if value <= &Decimal::ZERO {
        return Err(failure("positive", "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_code_shape() {
        assert!(CURRENCY_CODE.is_match("EUR"));
        assert!(!CURRENCY_CODE.is_match("eur"));
        assert!(!CURRENCY_CODE.is_match("EURO"));
    }

    #[test]
    fn test_decimal_bounds() {
        assert!(non_negative(&Decimal::ZERO).is_ok());
        assert!(non_negative(&Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(positive(&Decimal::ZERO).is_err());
        assert!(positive(&Decimal::from_str("2.5").unwrap()).is_ok());
    }
}
