//! Fixed-point conversion between ring widths and stored integers.
//!
//! A file stored with `digits` precision keeps every width as
//! `round(width * 10^(digits-1))`. The terminator at the end of each series
//! has `digits` nines, so the precision can be recovered from it on read.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_DIGITS;
use crate::error::{Result, RwlError};

/// Sign of the terminator synthesized by the writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentinelSign {
    /// `-9999` style terminator, recognized by every reader
    #[default]
    Negative,
    /// `9999` style terminator; read back through the legacy marker or look-ahead rules
    Positive,
}

/// Check that `digits` can be used for scaling
pub fn validate_digits(digits: u8) -> Result<u8> {
    validate_digits_up_to(digits, MAX_DIGITS)
}

/// Check that `digits` lies in `1..=max`
pub fn validate_digits_up_to(digits: u8, max: u8) -> Result<u8> {
    if digits == 0 || digits > max {
        return Err(RwlError::InvalidDigits {
            digits: u32::from(digits),
            max,
        });
    }
    Ok(digits)
}

/// Scale factor `10^(digits-1)`
pub fn scale(digits: u8) -> Result<f64> {
    let digits = validate_digits(digits)?;
    Ok(10f64.powi(i32::from(digits) - 1))
}

/// Number of decimal digits in `|n|`; zero has one digit
#[must_use]
pub fn count_digits(n: i64) -> u8 {
    let mut n = n.unsigned_abs();
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Terminator value for the given precision: `digits` nines with the chosen sign
pub fn terminator(digits: u8, sign: SentinelSign) -> Result<i64> {
    let digits = validate_digits(digits)?;
    let magnitude = 10i64.pow(u32::from(digits)) - 1;
    Ok(match sign {
        SentinelSign::Negative => -magnitude,
        SentinelSign::Positive => magnitude,
    })
}

/// Convert raw integers (terminator last) to widths
///
/// When `digits` is `None` the precision is inferred from the number of
/// digits in the terminator. Returns the widths and the precision used.
///
/// # Errors
/// `MissingTerminator` for an empty slice, `InvalidDigits` when the given or
/// inferred precision is out of range.
///
/// # Example
/// ```
/// let (widths, digits) = ringwidth::precision::decode(&[123, 45, 67, -9999], None).unwrap();
/// assert_eq!(digits, 4);
/// assert_eq!(widths, vec![0.123, 0.045, 0.067]);
/// ```
pub fn decode(raw: &[i64], digits: Option<u8>) -> Result<(Vec<f64>, u8)> {
    let (&last, values) = raw.split_last().ok_or(RwlError::MissingTerminator)?;
    let digits = digits.unwrap_or_else(|| count_digits(last));
    let factor = scale(digits)?;

    #[allow(clippy::cast_precision_loss)]
    let widths = values.iter().map(|&v| v as f64 / factor).collect();
    Ok((widths, digits))
}

/// Convert a width to its stored integer, rounding half away from zero
///
/// Returns `None` for non-finite results or results outside the `i64` range.
/// `digits` is assumed to have been validated.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn encode(value: f64, digits: u8) -> Option<i64> {
    let scaled = (value * 10f64.powi(i32::from(digits) - 1)).round();
    if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
        return None;
    }
    Some(scaled as i64)
}
