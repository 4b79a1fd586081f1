//! Minor-unit monetary arithmetic
//!
//! Every amount inside the engine is an `i64` count of minor currency
//! units (cents for USD/EUR). Conversion to and from decimal major units
//! happens only at the system boundary; mid-calculation floating point
//! would compound representation error.
//!
//! The single rounding rule everywhere is round-half-away-from-zero:
//! `100.999 → 10100`, `-25.50 → -2550`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::types::CurrencyCode;

/// Decimal places in the minor-unit representation (cents-equivalent).
/// Zero-decimal currencies are scaled upstream by the data producer.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Convert a decimal major-unit amount to minor units.
///
/// Rounds half away from zero, symmetrically for negative amounts
/// (refunds). Non-finite input and out-of-range results are errors.
pub fn to_minor_units(major: f64) -> Result<i64> {
    let amount = Decimal::from_f64(major).ok_or(Error::NonFiniteAmount(major))?;
    let scaled = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| Error::AmountOverflow(format!("{} major units", major)))?;
    round_decimal_to_minor(scaled)
}

/// Convert minor units back to a major-unit float.
///
/// Display boundary only; never feed the result back into the engine.
pub fn to_major_units(minor: i64) -> f64 {
    Decimal::new(minor, MINOR_UNIT_SCALE).to_f64().unwrap_or(0.0)
}

/// Format a minor-unit amount for display, e.g. `"USD 100.50"`.
pub fn format_currency(minor: i64, currency: &CurrencyCode) -> String {
    format!("{} {}", currency, Decimal::new(minor, MINOR_UNIT_SCALE))
}

/// Round a decimal value to a whole number of minor units,
/// half away from zero.
///
/// The one place the engine rounds; the FX normalizer and the major-unit
/// boundary both go through here.
pub fn round_decimal_to_minor(value: Decimal) -> Result<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| Error::AmountOverflow(format!("{} does not fit in i64 minor units", value)))
}

/// Checked minor-unit addition; overflow is an error, never a wrap.
pub fn checked_add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or_else(|| Error::AmountOverflow(format!("{} + {}", a, b)))
}

/// Checked minor-unit subtraction; overflow is an error, never a wrap.
pub fn checked_sub(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b)
        .ok_or_else(|| Error::AmountOverflow(format!("{} - {}", a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_to_minor_units_exact() {
        assert_eq!(to_minor_units(100.50).unwrap(), 10050);
        assert_eq!(to_minor_units(0.0).unwrap(), 0);
        assert_eq!(to_minor_units(1_000_000.0).unwrap(), 100_000_000);
    }

    #[test]
    fn test_to_minor_units_rounds_half_away_from_zero() {
        assert_eq!(to_minor_units(100.999).unwrap(), 10100);
        assert_eq!(to_minor_units(0.005).unwrap(), 1);
        assert_eq!(to_minor_units(-0.005).unwrap(), -1);
        assert_eq!(to_minor_units(-100.999).unwrap(), -10100);
    }

    #[test]
    fn test_to_minor_units_no_float_drift() {
        // The classic 0.1 + 0.2 case: converting each addend separately
        // must yield exactly 30 cents.
        let total = to_minor_units(0.1).unwrap() + to_minor_units(0.2).unwrap();
        assert_eq!(total, 30);
    }

    #[test]
    fn test_negative_amounts_symmetric() {
        assert_eq!(to_minor_units(-25.50).unwrap(), -2550);
        assert_eq!(to_minor_units(25.50).unwrap(), 2550);
    }

    #[test]
    fn test_to_minor_units_rejects_non_finite() {
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
        assert!(to_minor_units(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_to_major_units() {
        assert_eq!(to_major_units(10050), 100.50);
        assert_eq!(to_major_units(-2550), -25.50);
        assert_eq!(to_major_units(0), 0.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(10050, &usd()), "USD 100.50");
        assert_eq!(format_currency(-2550, &usd()), "USD -25.50");
        assert_eq!(format_currency(0, &usd()), "USD 0.00");
        assert_eq!(format_currency(5, &usd()), "USD 0.05");
    }

    #[test]
    fn test_checked_arithmetic_detects_overflow() {
        assert_eq!(checked_add(1, 2).unwrap(), 3);
        assert!(checked_add(i64::MAX, 1).is_err());
        assert!(checked_sub(i64::MIN, 1).is_err());
    }
}
