//! Statistical Process Control (SPC) charts for variables data.
//!
//! # Charts
//!
//! - [`MeanRangeChart`] — X-bar and Range chart, built by [`mean_range_chart`]
//! - [`MeanStdDevChart`] — X-bar and Standard Deviation chart, built by
//!   [`mean_std_dev_chart`]
//!
//! # Building blocks
//!
//! - [`partition`] — splits a flat sample sequence into full subgroups
//! - [`factors`] — A2, A3, D3, D4, B3, B4 for capacities 2..=25
//!
//! # References
//!
//! - SPC reference manual, 2nd ed., appendix E (constant tables).
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

mod chart;
mod factors;
mod subgroup;
mod variables;

pub use chart::{ChartPoint, ControlChart, ControlLimitSet, ControlLimits};
pub use factors::{factors, Factors, MAX_CAPACITY, MIN_CAPACITY};
pub use subgroup::partition;
pub use variables::{
    mean_range_chart, mean_range_chart_with, mean_std_dev_chart, mean_std_dev_chart_with,
    MeanRangeChart, MeanStdDevChart,
};
