//! Core control chart records and trait.
//!
//! Defines the building blocks shared by the subgroup charts: control
//! limits, plotted points, and the [`ControlChart`] trait that exposes a
//! chart's location and dispersion halves uniformly.
//!
//! # References
//!
//! - SPC reference manual, 2nd ed., chapter II: Control Charts for Variables.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use serde::Serialize;

use crate::notice::Notice;

/// Control limits for a chart.
///
/// Represents the upper control limit (UCL), center line (CL), and lower
/// control limit (LCL) computed from the subgroup statistics.
///
/// `ucl >= cl >= lcl` holds for the standard formulas because every table
/// multiplier is non-negative; it is not separately enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Center line.
    pub cl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

/// A single plotted point: the statistic of one subgroup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Zero-based subgroup index.
    pub index: usize,
    /// Subgroup statistic (mean, range or standard deviation).
    pub value: f64,
}

/// Limits plus the ordered plotted points of one chart half.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlLimitSet {
    /// Control limits.
    pub limits: ControlLimits,
    /// Per-subgroup statistics in subgroup order.
    pub points: Vec<ChartPoint>,
}

impl ControlLimitSet {
    pub(crate) fn new(limits: ControlLimits, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(index, &value)| ChartPoint { index, value })
            .collect();
        Self { limits, points }
    }

    /// The plotted values in subgroup order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// A two-part subgroup chart: a location (X-bar) half and a dispersion half.
pub trait ControlChart {
    /// The X-bar half: subgroup means and their limits.
    fn location(&self) -> &ControlLimitSet;

    /// The dispersion half: subgroup ranges or standard deviations.
    fn dispersion(&self) -> &ControlLimitSet;

    /// Advisory notices raised while building the chart.
    fn notices(&self) -> &[Notice];

    /// Number of subgroups plotted.
    fn subgroup_count(&self) -> usize {
        self.location().points.len()
    }
}
