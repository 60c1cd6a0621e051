//! Process capability indices (Cp, Cpk, Cpu, Cpl).
//!
//! # Formulas
//!
//! ```text
//! T   = USL - LSL
//! M   = (USL + LSL) / 2
//! Cp  = T / 6σ
//! K   = 2 |M - x̄| / T
//! Cpk = Cp (1 - K)
//! Cpu = (USL - x̄) / 3σ
//! Cpl = (x̄ - LSL) / 3σ
//! ```
//!
//! Every step runs on the decimal-safe engine; M, |M - x̄|, K and the
//! indices are rounded to 2 fractional digits as they are produced.
//!
//! # References
//!
//! - SPC reference manual, 2nd ed., chapter IV.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::Serialize;

use crate::decimal::{add, div, mul, round, sub};
use crate::error::SpcError;
use crate::gaussian::cumulative;
use crate::stats::STAT_DIGITS;

/// Two-sided specification limits.
///
/// # Examples
///
/// ```
/// use u_spc::capability::SpecLimits;
///
/// let limits = SpecLimits::new(11.0, 9.0).unwrap();
/// assert_eq!(limits.tolerance(), 2.0);
/// assert_eq!(limits.midpoint(), 10.0);
///
/// // USL must lie above LSL
/// assert!(SpecLimits::new(9.0, 11.0).is_err());
/// assert!(SpecLimits::new(10.0, 10.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecLimits {
    usl: f64,
    lsl: f64,
}

/// Computed capability indices.
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp | >= 1.33 | Spread fits the tolerance |
/// | Cpk | >= 1.33 | Spread fits and the process is centered |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityIndices {
    /// Cp = T / (6 σ).
    pub cp: f64,
    /// Cpk = Cp (1 - K).
    pub cpk: f64,
    /// Cpu = (USL - x̄) / (3 σ).
    pub cpu: f64,
    /// Cpl = (x̄ - LSL) / (3 σ).
    pub cpl: f64,
    /// Relative centering offset K = 2 |M - x̄| / T.
    pub k: f64,
    /// Midpoint of the specification range, M.
    pub midpoint: f64,
    /// Tolerance T = USL - LSL.
    pub tolerance: f64,
}

/// Expected nonconforming output under a fitted normal distribution, in
/// parts per million.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonconformingPpm {
    /// Expected share below LSL.
    pub below_lsl: f64,
    /// Expected share above USL.
    pub above_usl: f64,
    /// Sum of both tails.
    pub total: f64,
}

impl SpecLimits {
    /// Creates two-sided specification limits.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidParameter`] if either limit is non-finite or
    /// `usl <= lsl`.
    pub fn new(usl: f64, lsl: f64) -> Result<Self, SpcError> {
        if !usl.is_finite() {
            return Err(SpcError::invalid("usl", "USL must be finite"));
        }
        if !lsl.is_finite() {
            return Err(SpcError::invalid("lsl", "LSL must be finite"));
        }
        if usl <= lsl {
            return Err(SpcError::invalid(
                "usl",
                format!("USL ({usl}) must be greater than LSL ({lsl})"),
            ));
        }
        Ok(Self { usl, lsl })
    }

    /// Upper specification limit.
    pub fn usl(&self) -> f64 {
        self.usl
    }

    /// Lower specification limit.
    pub fn lsl(&self) -> f64 {
        self.lsl
    }

    /// Tolerance T = USL - LSL.
    pub fn tolerance(&self) -> f64 {
        sub(self.usl, self.lsl)
    }

    /// Midpoint M = (USL + LSL) / 2, rounded to 2 fractional digits.
    pub fn midpoint(&self) -> f64 {
        round(div(add(self.usl, self.lsl), 2.0), STAT_DIGITS)
    }

    /// Computes the capability indices for a process with the given mean
    /// and standard deviation.
    ///
    /// # Errors
    ///
    /// [`SpcError::DegenerateInput`] if `std_dev` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::capability::SpecLimits;
    ///
    /// let limits = SpecLimits::new(20.0, 8.0).unwrap();
    /// let idx = limits.indices(14.0, 1.31).unwrap();
    /// assert_eq!(idx.cp, 1.53);  // 12 / 7.86
    /// assert_eq!(idx.cpk, 1.53); // centered: K = 0
    /// ```
    pub fn indices(&self, mean: f64, std_dev: f64) -> Result<CapabilityIndices, SpcError> {
        if std_dev == 0.0 {
            return Err(SpcError::DegenerateInput("standard deviation"));
        }
        let tolerance = self.tolerance();
        let midpoint = self.midpoint();
        let three_sigma = mul(3.0, std_dev);

        let cp = round(div(tolerance, mul(6.0, std_dev)), STAT_DIGITS);
        let offset = round(sub(midpoint, mean), STAT_DIGITS).abs();
        let k = round(div(mul(2.0, offset), tolerance), STAT_DIGITS);
        let cpk = round(mul(cp, sub(1.0, k)), STAT_DIGITS);
        let cpu = round(div(sub(self.usl, mean), three_sigma), STAT_DIGITS);
        let cpl = round(div(sub(mean, self.lsl), three_sigma), STAT_DIGITS);

        Ok(CapabilityIndices {
            cp,
            cpk,
            cpu,
            cpl,
            k,
            midpoint,
            tolerance,
        })
    }

    /// Expected nonconforming parts per million for a normal process with
    /// the given mean and standard deviation, rounded to 2 fractional
    /// digits.
    pub fn expected_ppm(&self, mean: f64, std_dev: f64) -> NonconformingPpm {
        const PPM: f64 = 1_000_000.0;
        let below_lsl = round(mul(cumulative(self.lsl, mean, std_dev), PPM), STAT_DIGITS);
        let above_usl = round(
            mul(sub(1.0, cumulative(self.usl, mean, std_dev)), PPM),
            STAT_DIGITS,
        );
        NonconformingPpm {
            below_lsl,
            above_usl,
            total: add(below_lsl, above_usl),
        }
    }
}
