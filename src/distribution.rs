//! Frequency histogram.
//!
//! Splits `[min, max]` of the samples into `bin_count` equal-width bins and
//! counts the samples in each.
//!
//! # Binning
//!
//! ```text
//! width = (max - min) / bins        (3 fractional digits)
//! edge₀ = min, edgeᵢ = edgeᵢ₋₁ + width (3 fractional digits)
//! ```
//!
//! Every bin is closed on both ends, so a sample lying exactly on an edge
//! shared by two bins is counted in both. This differs from the half-open
//! rule of the [capability chart](crate::capability) and is kept as is;
//! frequencies sum to the sample count only when no sample sits on an
//! internal edge.
//!
//! The width is rounded, so accumulated edges can drift away from `max`.
//! Edges are capped at `max` and the last bin always ends at `max`, so
//! every sample lands in at least one bin.
//!
//! # Examples
//!
//! ```
//! use u_spc::histogram;
//!
//! let data = [1.0, 2.0, 3.0, 5.0, 6.0, 8.0, 9.0, 10.0];
//! let h = histogram(&data, 3).unwrap();
//!
//! let labels: Vec<&str> = h.bins.iter().map(|b| b.label.as_str()).collect();
//! assert_eq!(labels, ["1~4", "4~7", "7~10"]);
//! assert_eq!(h.frequencies(), vec![3, 2, 3]);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::config::Guidelines;
use crate::decimal::{add, div, round};
use crate::error::{ensure_finite, SpcError};
use crate::notice::{raise, ChartKind, Notice};
use crate::stats::range;

/// Fractional digits kept on the bin width and edges.
const EDGE_DIGITS: u32 = 3;

/// One histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// `"<lower>~<upper>"`.
    pub label: String,
    /// Lower edge (inclusive).
    pub lower: f64,
    /// Upper edge (inclusive).
    pub upper: f64,
    /// Number of samples in `[lower, upper]`.
    pub frequency: usize,
}

/// Result of [`histogram`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Width of every bin.
    pub bin_width: f64,
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Advisory notices raised while building.
    pub notices: Vec<Notice>,
}

impl Histogram {
    /// Bin frequencies in order.
    pub fn frequencies(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.frequency).collect()
    }

    /// Sum of all bin frequencies. Exceeds the sample count when samples
    /// lie on internal edges.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.frequency).sum()
    }
}

/// Builds a histogram with the default [`Guidelines`].
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] if `bin_count` is zero or too large to
///   allocate
/// - [`SpcError::NonFiniteSample`] if a sample is NaN or infinite
/// - [`SpcError::InsufficientData`] for empty input
pub fn histogram(samples: &[f64], bin_count: usize) -> Result<Histogram, SpcError> {
    histogram_with(&Guidelines::default(), samples, bin_count)
}

/// Builds a histogram, checking the sample size against `guidelines`.
///
/// # Errors
///
/// See [`histogram`].
pub fn histogram_with(
    guidelines: &Guidelines,
    samples: &[f64],
    bin_count: usize,
) -> Result<Histogram, SpcError> {
    if bin_count == 0 {
        return Err(SpcError::invalid("bin_count", "at least 1 bin is required"));
    }
    ensure_finite(samples)?;
    let empty = SpcError::InsufficientData { needed: 1, got: 0 };
    let min = samples
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or_else(|| empty.clone())?;
    let max = samples.iter().copied().reduce(f64::max).ok_or(empty)?;
    let spread = range(samples).unwrap_or(0.0);

    let mut notices = Vec::new();
    if samples.len() < guidelines.histogram_min_samples {
        raise(
            &mut notices,
            Notice::SampleSize {
                chart: ChartKind::Histogram,
                count: samples.len(),
                recommended_min: guidelines.histogram_min_samples,
            },
        );
    }

    let bin_width = round(div(spread, bin_count as f64), EDGE_DIGITS);
    let mut bins: Vec<HistogramBin> = Vec::new();
    bins.try_reserve(bin_count).map_err(|_| {
        SpcError::invalid("bin_count", format!("cannot allocate {bin_count} bins"))
    })?;
    let last = bin_count - 1;
    let mut lower = min;
    for i in 0..bin_count {
        let upper = if i == last {
            max
        } else {
            round(add(lower, bin_width), EDGE_DIGITS).min(max)
        };
        let frequency = samples
            .iter()
            .filter(|&&x| x >= lower && x <= upper)
            .count();
        bins.push(HistogramBin {
            label: format!("{lower}~{upper}"),
            lower,
            upper,
            frequency,
        });
        lower = upper;
    }

    debug!(
        samples = samples.len(),
        bins = bin_count,
        bin_width,
        "computed histogram"
    );

    Ok(Histogram {
        bin_width,
        bins,
        notices,
    })
}
