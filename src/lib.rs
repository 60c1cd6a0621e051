//! # u-spc
//!
//! Statistical process control (SPC) chart computation: the plotted points,
//! control limits, capability indices and bins that a charting front end
//! draws. Nothing is rendered here.
//!
//! Every statistic runs on a decimal-safe arithmetic engine, so chained
//! add/subtract/multiply/divide sequences give the results a hand
//! calculation from the handbook tables gives, not the drifted binary
//! floating-point ones.
//!
//! ## Charts
//!
//! | Builder | Output |
//! |---|---|
//! | [`mean_range_chart`] | X-bar and R limits with plotted points |
//! | [`mean_std_dev_chart`] | X-bar and S limits with plotted points |
//! | [`capability_chart`] | Cp, Cpk, Cpu, Cpl and binned distribution with normal curve |
//! | [`histogram`] | Labelled frequency bins |
//! | [`pareto_chart`] | Distinct values with frequency and share |
//! | [`sample_trend_chart`] | Validated timed samples |
//! | [`basic_trend_chart`] | Validated timed samples with USL/LSL |
//!
//! ## Modules
//!
//! - [`decimal`] — Decimal-safe arithmetic engine
//! - [`stats`] — Mean, range, sample standard deviation
//! - [`gaussian`] — Normal density and cumulative distribution
//! - [`spc`] — Subgrouping, constant tables, variables control charts
//! - [`capability`] — Process capability indices and chart
//! - [`distribution`] — Histogram
//! - [`pareto`] — Pareto (permutation) chart
//! - [`trend`] — Trend charts
//!
//! ## Advisory notices
//!
//! Parameters outside the handbook's recommended bands never abort a
//! computation. Builders attach [`Notice`]s to their result and emit them as
//! `tracing` warnings. The bands live in [`Guidelines`]; every builder has a
//! `*_with` form taking custom guidelines.
//!
//! ## Example
//!
//! ```
//! use u_spc::mean_range_chart;
//!
//! let samples = [10.0, 12.0, 14.0, 16.0, 18.0, 10.0, 14.0, 14.0, 16.0, 18.0];
//! let chart = mean_range_chart(&samples, 2, 5).unwrap();
//!
//! assert_eq!(chart.mean.limits.cl, 14.2);
//! assert_eq!(chart.mean.limits.ucl, 18.82);
//! assert_eq!(chart.mean.limits.lcl, 9.58);
//! assert_eq!(chart.range.limits.cl, 8.0);
//! assert!(!chart.notices.is_empty()); // 2 subgroups, 20..=25 recommended
//! ```

pub mod capability;
pub mod config;
pub mod decimal;
pub mod distribution;
pub mod error;
pub mod gaussian;
pub mod notice;
pub mod pareto;
pub mod spc;
pub mod stats;
pub mod trend;

pub use capability::{capability_chart, capability_chart_with, ProcessCapability};
pub use config::{Band, Guidelines};
pub use distribution::{histogram, histogram_with, Histogram};
pub use error::{ParseDecimalError, SpcError};
pub use notice::{ChartKind, Notice};
pub use pareto::{pareto_chart, ParetoPoint};
pub use spc::{
    mean_range_chart, mean_range_chart_with, mean_std_dev_chart, mean_std_dev_chart_with,
    MeanRangeChart, MeanStdDevChart,
};
pub use trend::{basic_trend_chart, sample_trend_chart, TimedSample};
