//! Advisory notices.
//!
//! The handbook recommends parameter bands for each chart (subgroup
//! capacity, subgroup count, sample size). Leaving a band never aborts a
//! computation: the builder attaches a [`Notice`] to its result and emits the
//! same notice as a `tracing` warning. Presentation is left to the caller.

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// The chart a notice or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// X-bar and range chart.
    MeanRange,
    /// X-bar and standard deviation chart.
    MeanStdDev,
    /// Frequency histogram.
    Histogram,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MeanRange => "mean-range chart",
            Self::MeanStdDev => "mean-std-dev chart",
            Self::Histogram => "histogram",
        })
    }
}

/// A non-fatal deviation from the recommended chart parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Subgroup capacity outside the recommended band.
    SubgroupCapacity {
        /// Chart the capacity was given to.
        chart: ChartKind,
        /// Capacity that was used.
        capacity: usize,
        /// Smallest recommended capacity.
        recommended_min: usize,
        /// Largest recommended capacity, if bounded.
        recommended_max: Option<usize>,
    },
    /// Requested subgroup count outside the recommended band.
    SubgroupCount {
        /// Chart the count was given to.
        chart: ChartKind,
        /// Requested number of subgroups.
        count: usize,
        /// Smallest recommended count.
        recommended_min: usize,
        /// Largest recommended count.
        recommended_max: usize,
    },
    /// Fewer complete subgroups could be formed than were requested.
    SubgroupShortfall {
        /// Chart being built.
        chart: ChartKind,
        /// Requested number of subgroups.
        requested: usize,
        /// Number of complete subgroups actually formed.
        formed: usize,
    },
    /// Fewer samples than recommended.
    SampleSize {
        /// Chart being built.
        chart: ChartKind,
        /// Number of samples supplied.
        count: usize,
        /// Recommended minimum.
        recommended_min: usize,
    },
}

impl Notice {
    /// The chart this notice was raised for.
    pub fn chart(&self) -> ChartKind {
        match self {
            Self::SubgroupCapacity { chart, .. }
            | Self::SubgroupCount { chart, .. }
            | Self::SubgroupShortfall { chart, .. }
            | Self::SampleSize { chart, .. } => *chart,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubgroupCapacity {
                chart,
                capacity,
                recommended_min,
                recommended_max: Some(max),
            } => write!(
                f,
                "{chart}: subgroup capacity {capacity} is outside the recommended {recommended_min}..={max}"
            ),
            Self::SubgroupCapacity {
                chart,
                capacity,
                recommended_min,
                recommended_max: None,
            } => write!(
                f,
                "{chart}: subgroup capacity {capacity} is below the recommended minimum of {recommended_min}"
            ),
            Self::SubgroupCount {
                chart,
                count,
                recommended_min,
                recommended_max,
            } => write!(
                f,
                "{chart}: {count} subgroups requested, {recommended_min}..={recommended_max} recommended"
            ),
            Self::SubgroupShortfall {
                chart,
                requested,
                formed,
            } => write!(
                f,
                "{chart}: {requested} subgroups requested but only {formed} complete subgroups formed"
            ),
            Self::SampleSize {
                chart,
                count,
                recommended_min,
            } => write!(
                f,
                "{chart}: {count} samples given, at least {recommended_min} recommended"
            ),
        }
    }
}

/// Logs `notice` and appends it to `notices`.
pub(crate) fn raise(notices: &mut Vec<Notice>, notice: Notice) {
    warn!(chart = %notice.chart(), "{notice}");
    notices.push(notice);
}
