//! Error types.
//!
//! Every chart builder returns `Result<_, SpcError>`. Fatal conditions are
//! detected before any output record is assembled, so an `Err` never comes
//! with a partially built chart.

use thiserror::Error;

/// Errors raised by the chart builders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpcError {
    /// A chart parameter is outside the range the formulas support.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// A trend chart input does not carry a time key on its first element.
    #[error("trend samples must carry a time key, e.g. [{{ time, value }}]")]
    MissingTimeDimension,

    /// Fewer samples than the computation requires.
    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData {
        /// Minimum number of values required.
        needed: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// A quantity used as a divisor is zero.
    #[error("degenerate input: {0} is zero")]
    DegenerateInput(&'static str),

    /// A measurement is NaN or infinite.
    #[error("sample at index {index} is not finite")]
    NonFiniteSample {
        /// Position of the offending sample.
        index: usize,
    },
}

/// Error returned when parsing a [`Decimal`](crate::decimal::Decimal) from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    /// The input has no digits.
    #[error("cannot parse decimal from empty string")]
    Empty,
    /// The input contains something other than a sign, digits and one point.
    #[error("invalid digit found in decimal string")]
    InvalidDigit,
    /// The digits do not fit the 128-bit mantissa.
    #[error("decimal does not fit a 128-bit mantissa")]
    Overflow,
}

impl SpcError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Rejects NaN and infinite measurements.
pub(crate) fn ensure_finite(data: &[f64]) -> Result<(), SpcError> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SpcError::NonFiniteSample { index }),
        None => Ok(()),
    }
}
