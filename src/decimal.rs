//! Decimal-safe arithmetic.
//!
//! Binary floating point drifts on chained multiply/divide/subtract
//! sequences: `0.1 + 0.2` is `0.30000000000000004` and `0.3 / 0.1` is
//! `2.9999999999999996`. The SPC formulas in this crate are chains of exactly
//! those operations followed by a fixed-digit rounding, so the drift shows up
//! as off-by-one-digit control limits.
//!
//! This module converts each `f64` operand to the decimal it was written as
//! (its shortest round-trip representation), performs the operation on a
//! fixed-point [`Decimal`] with a 128-bit integer mantissa, and converts the
//! exact result back to the nearest `f64`.
//!
//! # Operations
//!
//! - [`add`], [`sub`] — operands aligned to the larger fractional digit count
//! - [`mul`] — mantissas multiplied, scales summed
//! - [`div`] — mantissas divided to 28 significant digits, scale corrected by
//!   the divisor's minus the dividend's fractional digit count
//! - [`round`] — half away from zero on the decimal representation
//!
//! Operands that are not finite, or whose exact result overflows the
//! mantissa, fall back to plain `f64` arithmetic. Division by zero therefore
//! yields the native `±inf` / `NaN`.
//!
//! # Examples
//!
//! ```
//! use u_spc::decimal::{add, div, mul, round, sub};
//!
//! assert_eq!(add(0.1, 0.2), 0.3);
//! assert_eq!(sub(0.3, 0.1), 0.2);
//! assert_eq!(mul(1.1, 3.0), 3.3);
//! assert_eq!(div(0.3, 0.1), 3.0);
//! assert_eq!(round(1.005, 2), 1.01);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::trace;

use crate::error::ParseDecimalError;

/// Significant digits produced by [`Decimal::checked_div`].
const DIV_SIGNIFICANT_DIGITS: u32 = 28;

/// A fixed-point decimal: `mantissa * 10^-scale`.
///
/// Values are kept normalized (no trailing zeros in the fractional part), so
/// [`Decimal::scale`] is the number of fractional digits the value is
/// written with and derived equality is numeric equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

fn pow10(exp: u32) -> Option<i128> {
    10_i128.checked_pow(exp)
}

impl Decimal {
    /// The value zero.
    pub const ZERO: Self = Self {
        mantissa: 0,
        scale: 0,
    };

    /// Creates `mantissa * 10^-scale`.
    pub fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }.normalize()
    }

    fn normalize(mut self) -> Self {
        if self.mantissa == 0 {
            return Self::ZERO;
        }
        while self.scale > 0 && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.scale -= 1;
        }
        self
    }

    /// Integer mantissa.
    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Converts an `f64` through its shortest round-trip representation.
    ///
    /// Returns `None` for non-finite values and for magnitudes whose digits
    /// do not fit the mantissa.
    ///
    /// ```
    /// use u_spc::decimal::Decimal;
    ///
    /// let d = Decimal::from_f64(12.345).unwrap();
    /// assert_eq!(d.mantissa(), 12345);
    /// assert_eq!(d.scale(), 3);
    /// assert!(Decimal::from_f64(f64::NAN).is_none());
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        value.to_string().parse().ok()
    }

    /// Converts to the nearest `f64`.
    pub fn to_f64(self) -> f64 {
        // Both operands exact, so the single division is correctly rounded.
        if self.scale <= 22 && self.mantissa.unsigned_abs() <= 1 << 53 {
            return self.mantissa as f64 / 10_f64.powi(self.scale as i32);
        }
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Rounds to `dp` fractional digits, half away from zero.
    pub fn round_dp(self, dp: u32) -> Self {
        if self.scale <= dp {
            return self;
        }
        let Some(divisor) = pow10(self.scale - dp) else {
            // |mantissa| < 10^39 / 2, below half of the last kept digit.
            return Self::ZERO;
        };
        let quotient = self.mantissa / divisor;
        let remainder = (self.mantissa % divisor).unsigned_abs();
        let rounded = if remainder >= divisor.unsigned_abs() / 2 {
            quotient + self.mantissa.signum()
        } else {
            quotient
        };
        Self::new(rounded, dp)
    }

    fn aligned(self, other: Self) -> Option<(i128, i128, u32)> {
        let scale = self.scale.max(other.scale);
        let lhs = self.mantissa.checked_mul(pow10(scale - self.scale)?)?;
        let rhs = other.mantissa.checked_mul(pow10(scale - other.scale)?)?;
        Some((lhs, rhs, scale))
    }

    /// Exact sum, or `None` on mantissa overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let (lhs, rhs, scale) = self.aligned(other)?;
        Some(Self::new(lhs.checked_add(rhs)?, scale))
    }

    /// Exact difference, or `None` on mantissa overflow.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        let (lhs, rhs, scale) = self.aligned(other)?;
        Some(Self::new(lhs.checked_sub(rhs)?, scale))
    }

    /// Exact product, or `None` on mantissa overflow.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let mantissa = self.mantissa.checked_mul(other.mantissa)?;
        Some(Self::new(mantissa, self.scale.checked_add(other.scale)?))
    }

    /// Quotient to 28 significant digits, rounded half away from zero.
    ///
    /// Returns `None` when `other` is zero or the result overflows.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.mantissa == 0 {
            return None;
        }
        let numerator = self.mantissa.unsigned_abs();
        let denominator = other.mantissa.unsigned_abs();
        let limit = 10_u128.pow(DIV_SIGNIFICANT_DIGITS - 1);

        let mut quotient = numerator / denominator;
        let mut remainder = numerator % denominator;
        let mut steps: u32 = 0;
        while remainder != 0 && quotient < limit {
            let Some(next) = remainder.checked_mul(10) else {
                break;
            };
            quotient = quotient * 10 + next / denominator;
            remainder = next % denominator;
            steps += 1;
        }
        if remainder != 0 && remainder >= denominator - remainder {
            quotient += 1;
        }

        let magnitude = i128::try_from(quotient).ok()?;
        let mantissa = if (self.mantissa < 0) != (other.mantissa < 0) {
            -magnitude
        } else {
            magnitude
        };
        let scale = i64::from(steps) + i64::from(self.scale) - i64::from(other.scale);
        if scale >= 0 {
            Some(Self::new(mantissa, u32::try_from(scale).ok()?))
        } else {
            let factor = pow10(u32::try_from(-scale).ok()?)?;
            Some(Self::new(mantissa.checked_mul(factor)?, 0))
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            write!(f, "{sign}{digits}")
        } else if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int}.{frac}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[+-]digits[.digits]`. Exponent notation is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            Some(_) => (false, s),
            None => return Err(ParseDecimalError::Empty),
        };
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(ParseDecimalError::Empty);
        }

        let mut mantissa: i128 = 0;
        for b in int.bytes().chain(frac.bytes()) {
            if !b.is_ascii_digit() {
                return Err(ParseDecimalError::InvalidDigit);
            }
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(b - b'0')))
                .ok_or(ParseDecimalError::Overflow)?;
        }
        let scale = u32::try_from(frac.len()).map_err(|_| ParseDecimalError::Overflow)?;
        Ok(Self::new(if negative { -mantissa } else { mantissa }, scale))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn exact_or_float(
    a: f64,
    b: f64,
    op: &'static str,
    exact: fn(Decimal, Decimal) -> Option<Decimal>,
    float: fn(f64, f64) -> f64,
) -> f64 {
    if let (Some(x), Some(y)) = (Decimal::from_f64(a), Decimal::from_f64(b)) {
        if let Some(result) = exact(x, y) {
            return result.to_f64();
        }
    }
    trace!(a, b, op, "no exact decimal result, using binary floating point");
    float(a, b)
}

/// Decimal-exact `a + b`.
pub fn add(a: f64, b: f64) -> f64 {
    exact_or_float(a, b, "add", Decimal::checked_add, |x, y| x + y)
}

/// Decimal-exact `a - b`.
///
/// The result carries no more fractional digits than the longer operand.
pub fn sub(a: f64, b: f64) -> f64 {
    exact_or_float(a, b, "sub", Decimal::checked_sub, |x, y| x - y)
}

/// Decimal-exact `a * b`.
pub fn mul(a: f64, b: f64) -> f64 {
    exact_or_float(a, b, "mul", Decimal::checked_mul, |x, y| x * y)
}

/// `a / b` to 28 significant decimal digits.
///
/// Division by zero returns the native `f64` result (`±inf` or `NaN`).
pub fn div(a: f64, b: f64) -> f64 {
    exact_or_float(a, b, "div", Decimal::checked_div, |x, y| x / y)
}

/// Rounds `value` to `digits` fractional digits, half away from zero.
///
/// Non-finite values are returned unchanged.
pub fn round(value: f64, digits: u32) -> f64 {
    match Decimal::from_f64(value) {
        Some(d) => d.round_dp(digits).to_f64(),
        None => value,
    }
}
