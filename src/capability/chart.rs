//! Process capability chart.
//!
//! Combines the capability indices with a binned frequency distribution
//! spanning `x̄ ± kσ` and the normal density at every bin edge, which is
//! what a capability chart plots as bars and curve.
//!
//! # Binning
//!
//! ```text
//! lower = x̄ - kσ,  upper = x̄ + kσ       (2 fractional digits)
//! width = (upper - lower) / (bins - 1)    (2 fractional digits)
//! edge₀ = lower, edgeᵢ = edgeᵢ₋₁ + width  (6 fractional digits)
//! ```
//!
//! Frequencies: the first bin counts samples strictly below its edge, the
//! last bin samples strictly above its edge, and every other bin the samples
//! in `(previous edge, edge]`.
//!
//! Because the edges come from rounded intermediates, bars and curve can be
//! offset from an exact-arithmetic recomputation by up to one rounding step.
//! The indices are not affected.

use serde::Serialize;
use tracing::debug;

use super::indices::{CapabilityIndices, NonconformingPpm, SpecLimits};
use crate::config::Guidelines;
use crate::decimal::{add, div, mul, round, sub};
use crate::error::{ensure_finite, SpcError};
use crate::gaussian::density;
use crate::stats::{mean, sample_std_dev, STAT_DIGITS};

/// Fractional digits kept on accumulated bin edges.
const EDGE_DIGITS: u32 = 6;

/// One bin of a capability chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityBin {
    /// Bin edge.
    pub x: f64,
    /// Number of samples counted in the bin.
    pub frequency: usize,
    /// Normal density at `x` for the sample mean and standard deviation,
    /// rounded to 3 fractional digits.
    pub density: f64,
}

/// Result of a capability analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCapability {
    /// Upper specification limit.
    pub usl: f64,
    /// Lower specification limit.
    pub lsl: f64,
    /// Cp, Cpk, Cpu, Cpl, K, M and T.
    #[serde(flatten)]
    pub indices: CapabilityIndices,
    /// Sample mean (2 fractional digits).
    pub mean: f64,
    /// Sample standard deviation (2 fractional digits).
    pub std_dev: f64,
    /// Lowest bin edge, x̄ - kσ.
    pub lower_limit: f64,
    /// Highest nominal bin edge, x̄ + kσ.
    pub upper_limit: f64,
    /// Distance between consecutive bin edges.
    pub bin_width: f64,
    /// Bins in ascending edge order.
    pub bins: Vec<CapabilityBin>,
    /// Expected nonconforming output of the fitted normal distribution.
    pub expected_ppm: NonconformingPpm,
}

/// Builds a capability chart with the default [`Guidelines`].
///
/// `sigma_multiple` sets the half-width of the binned span in standard
/// deviations; `None` uses 3.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] if `bin_count < 2` or too large to
///   allocate, `usl <= lsl`, a limit is non-finite, or `sigma_multiple` is
///   not a positive number
/// - [`SpcError::NonFiniteSample`] if a sample is NaN or infinite
/// - [`SpcError::InsufficientData`] with fewer than 2 samples
/// - [`SpcError::DegenerateInput`] if the sample standard deviation is zero
///
/// # Examples
///
/// ```
/// use u_spc::capability_chart;
///
/// let data = [12.0, 13.0, 14.0, 15.0, 16.0, 14.0, 13.0, 15.0];
/// let chart = capability_chart(&data, 7, 20.0, 8.0, None).unwrap();
///
/// assert_eq!(chart.mean, 14.0);
/// assert_eq!(chart.std_dev, 1.31);
/// assert_eq!(chart.indices.cp, 1.53);
/// assert_eq!(chart.indices.cpk, 1.53);
/// assert_eq!(chart.bins.len(), 7);
/// assert_eq!(chart.bins[0].x, 10.07);
/// ```
pub fn capability_chart(
    samples: &[f64],
    bin_count: usize,
    usl: f64,
    lsl: f64,
    sigma_multiple: Option<f64>,
) -> Result<ProcessCapability, SpcError> {
    capability_chart_with(
        &Guidelines::default(),
        samples,
        bin_count,
        usl,
        lsl,
        sigma_multiple,
    )
}

/// Builds a capability chart, taking the default sigma multiple from
/// `guidelines`.
///
/// # Errors
///
/// See [`capability_chart`].
pub fn capability_chart_with(
    guidelines: &Guidelines,
    samples: &[f64],
    bin_count: usize,
    usl: f64,
    lsl: f64,
    sigma_multiple: Option<f64>,
) -> Result<ProcessCapability, SpcError> {
    if bin_count < 2 {
        return Err(SpcError::invalid(
            "bin_count",
            format!("at least 2 bins are required, got {bin_count}"),
        ));
    }
    let limits = SpecLimits::new(usl, lsl)?;
    let sigma_multiple = sigma_multiple.unwrap_or(guidelines.sigma_multiple);
    if !sigma_multiple.is_finite() || sigma_multiple <= 0.0 {
        return Err(SpcError::invalid(
            "sigma_multiple",
            format!("must be a positive number, got {sigma_multiple}"),
        ));
    }
    ensure_finite(samples)?;

    let insufficient = SpcError::InsufficientData {
        needed: 2,
        got: samples.len(),
    };
    let x_bar = mean(samples).ok_or_else(|| insufficient.clone())?;
    let sigma = sample_std_dev(samples).ok_or(insufficient)?;
    let indices = limits.indices(x_bar, sigma)?;

    let spread = mul(sigma_multiple, sigma);
    let lower_limit = round(sub(x_bar, spread), STAT_DIGITS);
    let upper_limit = round(add(x_bar, spread), STAT_DIGITS);
    let bin_width = round(
        div(sub(upper_limit, lower_limit), (bin_count - 1) as f64),
        STAT_DIGITS,
    );
    let bins = bin(samples, x_bar, sigma, lower_limit, bin_width, bin_count)?;

    debug!(
        cp = indices.cp,
        cpk = indices.cpk,
        mean = x_bar,
        std_dev = sigma,
        bins = bin_count,
        "computed process capability"
    );

    Ok(ProcessCapability {
        usl,
        lsl,
        expected_ppm: limits.expected_ppm(x_bar, sigma),
        indices,
        mean: x_bar,
        std_dev: sigma,
        lower_limit,
        upper_limit,
        bin_width,
        bins,
    })
}

fn bin(
    samples: &[f64],
    x_bar: f64,
    sigma: f64,
    lower_limit: f64,
    width: f64,
    count: usize,
) -> Result<Vec<CapabilityBin>, SpcError> {
    let last = count - 1;
    let mut bins: Vec<CapabilityBin> = Vec::new();
    bins.try_reserve(count)
        .map_err(|_| SpcError::invalid("bin_count", format!("cannot allocate {count} bins")))?;
    let mut previous = lower_limit;
    let mut edge = lower_limit;

    for i in 0..count {
        if i > 0 {
            edge = round(add(edge, width), EDGE_DIGITS);
        }
        let frequency = samples
            .iter()
            .filter(|&&x| match i {
                0 => x < edge,
                _ if i == last => x > edge,
                _ => x > previous && x <= edge,
            })
            .count();
        bins.push(CapabilityBin {
            x: edge,
            frequency,
            density: density(edge, x_bar, sigma),
        });
        previous = edge;
    }
    Ok(bins)
}
