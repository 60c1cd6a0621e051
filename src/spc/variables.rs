//! Variables control charts: X-bar-R and X-bar-S.
//!
//! Both charts split a flat measurement sequence into subgroups, track the
//! subgroup means on the location half and the within-subgroup spread on the
//! dispersion half. They share one algorithm and differ only in the spread
//! statistic and the multiplier tables.
//!
//! All limits are computed on the decimal-safe engine and reported to 2
//! fractional digits.
//!
//! # References
//!
//! - SPC reference manual, 2nd ed., chapter II.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Shewhart, W.A. (1931). *Economic Control of Quality of Manufactured Product*.

use serde::Serialize;
use tracing::debug;

use super::chart::{ControlChart, ControlLimitSet, ControlLimits};
use super::factors::{factors, Factors, MAX_CAPACITY, MIN_CAPACITY};
use super::subgroup::partition;
use crate::config::Guidelines;
use crate::decimal::{add, mul, round, sub};
use crate::error::{ensure_finite, SpcError};
use crate::notice::{raise, ChartKind, Notice};
use crate::stats::{mean, range, sample_std_dev, STAT_DIGITS};

// ---------------------------------------------------------------------------
// X-bar-R Chart
// ---------------------------------------------------------------------------

/// X-bar and Range (X-bar-R) control chart.
///
/// # Algorithm
///
/// 1. Partition the samples into subgroups of `capacity`.
/// 2. For each subgroup, compute the mean (X-bar) and range (R).
/// 3. Compute the grand mean (X-double-bar) and average range (R-bar).
/// 4. X-bar chart limits: CL = X-double-bar, UCL/LCL = CL +/- A2 * R-bar.
/// 5. R chart limits: CL = R-bar, UCL = D4 * R-bar, LCL = D3 * R-bar.
///
/// The handbook recommends a capacity of 4 or 5 and 20 to 25 subgroups;
/// other values produce [`Notice`]s but the same computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanRangeChart {
    /// X-bar half.
    pub mean: ControlLimitSet,
    /// R half.
    pub range: ControlLimitSet,
    /// Advisory notices.
    pub notices: Vec<Notice>,
}

impl ControlChart for MeanRangeChart {
    fn location(&self) -> &ControlLimitSet {
        &self.mean
    }

    fn dispersion(&self) -> &ControlLimitSet {
        &self.range
    }

    fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Builds an X-bar-R chart with the default [`Guidelines`].
///
/// `subgroup_count` is the number of subgroups requested; `capacity` the
/// number of samples per subgroup.
///
/// # Errors
///
/// - [`SpcError::InvalidParameter`] if `capacity` is outside 2..=25
/// - [`SpcError::NonFiniteSample`] if a sample is NaN or infinite
/// - [`SpcError::InsufficientData`] if no complete subgroup can be formed
///
/// # Examples
///
/// ```
/// use u_spc::mean_range_chart;
///
/// let data = [10.0, 12.0, 14.0, 16.0, 18.0, 10.0, 14.0, 14.0, 16.0, 18.0];
/// let chart = mean_range_chart(&data, 2, 5).unwrap();
///
/// assert_eq!(chart.mean.values(), vec![14.0, 14.4]);
/// assert_eq!(chart.mean.limits.cl, 14.2);
/// assert_eq!(chart.mean.limits.ucl, 18.82); // 14.2 + 0.577 * 8
/// assert_eq!(chart.mean.limits.lcl, 9.58);
/// assert_eq!(chart.range.limits.cl, 8.0);
/// ```
pub fn mean_range_chart(
    samples: &[f64],
    subgroup_count: usize,
    capacity: usize,
) -> Result<MeanRangeChart, SpcError> {
    mean_range_chart_with(&Guidelines::default(), samples, subgroup_count, capacity)
}

/// Builds an X-bar-R chart, checking parameters against `guidelines`.
///
/// # Errors
///
/// See [`mean_range_chart`].
pub fn mean_range_chart_with(
    guidelines: &Guidelines,
    samples: &[f64],
    subgroup_count: usize,
    capacity: usize,
) -> Result<MeanRangeChart, SpcError> {
    let built = build(
        Spread::Range,
        guidelines,
        samples,
        subgroup_count,
        capacity,
    )?;
    Ok(MeanRangeChart {
        mean: built.location,
        range: built.dispersion,
        notices: built.notices,
    })
}

// ---------------------------------------------------------------------------
// X-bar-S Chart
// ---------------------------------------------------------------------------

/// X-bar and Standard Deviation (X-bar-S) control chart.
///
/// # Algorithm
///
/// 1. Partition the samples into subgroups of `capacity`.
/// 2. For each subgroup, compute the mean (X-bar) and sample standard
///    deviation (S).
/// 3. Compute the grand mean (X-double-bar) and average S (S-bar).
/// 4. X-bar chart limits: CL = X-double-bar, UCL/LCL = CL +/- A3 * S-bar.
/// 5. S chart limits: CL = S-bar, UCL = B4 * S-bar, LCL = B3 * S-bar.
///
/// Preferred over X-bar-R for larger subgroups; the handbook recommends a
/// capacity of at least 10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanStdDevChart {
    /// X-bar half.
    pub mean: ControlLimitSet,
    /// S half.
    pub std_dev: ControlLimitSet,
    /// Advisory notices.
    pub notices: Vec<Notice>,
}

impl ControlChart for MeanStdDevChart {
    fn location(&self) -> &ControlLimitSet {
        &self.mean
    }

    fn dispersion(&self) -> &ControlLimitSet {
        &self.std_dev
    }

    fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Builds an X-bar-S chart with the default [`Guidelines`].
///
/// # Errors
///
/// Same conditions as [`mean_range_chart`].
///
/// # Examples
///
/// ```
/// use u_spc::mean_std_dev_chart;
///
/// let data = [10.0, 12.0, 14.0, 16.0, 18.0, 11.0, 13.0, 15.0, 17.0, 19.0];
/// let chart = mean_std_dev_chart(&data, 2, 5).unwrap();
///
/// assert_eq!(chart.std_dev.values(), vec![3.16, 3.16]);
/// assert_eq!(chart.mean.limits.cl, 14.5);
/// assert_eq!(chart.mean.limits.ucl, 19.01); // 14.5 + 1.427 * 3.16
/// assert!(!chart.notices.is_empty());
/// ```
pub fn mean_std_dev_chart(
    samples: &[f64],
    subgroup_count: usize,
    capacity: usize,
) -> Result<MeanStdDevChart, SpcError> {
    mean_std_dev_chart_with(&Guidelines::default(), samples, subgroup_count, capacity)
}

/// Builds an X-bar-S chart, checking parameters against `guidelines`.
///
/// # Errors
///
/// See [`mean_range_chart`].
pub fn mean_std_dev_chart_with(
    guidelines: &Guidelines,
    samples: &[f64],
    subgroup_count: usize,
    capacity: usize,
) -> Result<MeanStdDevChart, SpcError> {
    let built = build(
        Spread::StdDev,
        guidelines,
        samples,
        subgroup_count,
        capacity,
    )?;
    Ok(MeanStdDevChart {
        mean: built.location,
        std_dev: built.dispersion,
        notices: built.notices,
    })
}

// ---------------------------------------------------------------------------
// Shared algorithm
// ---------------------------------------------------------------------------

/// Within-subgroup spread statistic.
#[derive(Debug, Clone, Copy)]
enum Spread {
    Range,
    StdDev,
}

impl Spread {
    fn kind(self) -> ChartKind {
        match self {
            Self::Range => ChartKind::MeanRange,
            Self::StdDev => ChartKind::MeanStdDev,
        }
    }

    fn of(self, subgroup: &[f64]) -> Option<f64> {
        match self {
            Self::Range => range(subgroup),
            Self::StdDev => sample_std_dev(subgroup),
        }
    }

    /// (X-bar multiplier, lower multiplier, upper multiplier).
    fn multipliers(self, f: &Factors) -> (f64, f64, f64) {
        match self {
            Self::Range => (f.a2, f.d3, f.d4),
            Self::StdDev => (f.a3, f.b3, f.b4),
        }
    }

    fn capacity_notice(self, guidelines: &Guidelines, capacity: usize) -> Option<Notice> {
        match self {
            Self::Range if !guidelines.mean_range_capacity.contains(capacity) => {
                Some(Notice::SubgroupCapacity {
                    chart: self.kind(),
                    capacity,
                    recommended_min: guidelines.mean_range_capacity.min,
                    recommended_max: Some(guidelines.mean_range_capacity.max),
                })
            }
            Self::StdDev if capacity < guidelines.mean_std_dev_min_capacity => {
                Some(Notice::SubgroupCapacity {
                    chart: self.kind(),
                    capacity,
                    recommended_min: guidelines.mean_std_dev_min_capacity,
                    recommended_max: None,
                })
            }
            _ => None,
        }
    }
}

struct Built {
    location: ControlLimitSet,
    dispersion: ControlLimitSet,
    notices: Vec<Notice>,
}

fn build(
    spread: Spread,
    guidelines: &Guidelines,
    samples: &[f64],
    subgroup_count: usize,
    capacity: usize,
) -> Result<Built, SpcError> {
    let f = factors(capacity).ok_or_else(|| {
        SpcError::invalid(
            "capacity",
            format!("subgroup capacity must be {MIN_CAPACITY}..={MAX_CAPACITY}, got {capacity}"),
        )
    })?;
    ensure_finite(samples)?;

    let subgroups = partition(samples, subgroup_count, capacity);
    let insufficient = SpcError::InsufficientData {
        needed: capacity,
        got: samples.len(),
    };
    if subgroups.is_empty() {
        return Err(insufficient);
    }

    let mut means = Vec::with_capacity(subgroups.len());
    let mut spreads = Vec::with_capacity(subgroups.len());
    for subgroup in &subgroups {
        means.push(mean(subgroup).ok_or_else(|| insufficient.clone())?);
        spreads.push(spread.of(subgroup).ok_or_else(|| insufficient.clone())?);
    }
    let grand_mean = mean(&means).ok_or_else(|| insufficient.clone())?;
    let grand_spread = mean(&spreads).ok_or(insufficient)?;

    let mut notices = Vec::new();
    if let Some(notice) = spread.capacity_notice(guidelines, capacity) {
        raise(&mut notices, notice);
    }
    if !guidelines.subgroup_count.contains(subgroup_count) {
        raise(
            &mut notices,
            Notice::SubgroupCount {
                chart: spread.kind(),
                count: subgroup_count,
                recommended_min: guidelines.subgroup_count.min,
                recommended_max: guidelines.subgroup_count.max,
            },
        );
    }
    if subgroups.len() < subgroup_count {
        raise(
            &mut notices,
            Notice::SubgroupShortfall {
                chart: spread.kind(),
                requested: subgroup_count,
                formed: subgroups.len(),
            },
        );
    }

    let (location_factor, lower_factor, upper_factor) = spread.multipliers(&f);
    let half_width = mul(location_factor, grand_spread);
    let location = ControlLimits {
        ucl: round(add(grand_mean, half_width), STAT_DIGITS),
        cl: grand_mean,
        lcl: round(sub(grand_mean, half_width), STAT_DIGITS),
    };
    let dispersion = ControlLimits {
        ucl: round(mul(upper_factor, grand_spread), STAT_DIGITS),
        cl: grand_spread,
        lcl: round(mul(lower_factor, grand_spread), STAT_DIGITS),
    };

    debug!(
        chart = %spread.kind(),
        subgroups = subgroups.len(),
        capacity,
        grand_mean,
        grand_spread,
        "computed control limits"
    );

    Ok(Built {
        location: ControlLimitSet::new(location, &means),
        dispersion: ControlLimitSet::new(dispersion, &spreads),
        notices,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// 25 subgroups of 5 with a slow drift, so every default band is met
    /// for the X-bar-R chart.
    fn reference_samples() -> Vec<f64> {
        (0..125_i32)
            .map(|i| 25.0 + f64::from(i % 5) * 0.2 + f64::from(i / 25) * 0.1)
            .collect()
    }

    // --- MeanRangeChart ---

    #[test]
    fn test_mean_range_worked_example() {
        let data = [10.0, 12.0, 14.0, 16.0, 18.0, 10.0, 14.0, 14.0, 16.0, 18.0];
        let chart = mean_range_chart(&data, 2, 5).expect("valid parameters");

        assert_eq!(chart.mean.values(), vec![14.0, 14.4]);
        assert_eq!(chart.range.values(), vec![8.0, 8.0]);
        assert_eq!(chart.mean.limits.cl, 14.2);
        assert_eq!(chart.mean.limits.ucl, 18.82);
        assert_eq!(chart.mean.limits.lcl, 9.58);

        // D4(5) = 2.114, D3(5) = 0
        assert_eq!(chart.range.limits.cl, 8.0);
        assert_eq!(chart.range.limits.ucl, 16.91);
        assert_eq!(chart.range.limits.lcl, 0.0);
    }

    #[test]
    fn test_mean_range_unequal_ranges() {
        let data = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 10.0, 12.0, 14.0, 16.0];
        let chart = mean_range_chart(&data, 2, 5).expect("valid parameters");

        assert_eq!(chart.mean.values(), vec![14.0, 14.4]);
        assert_eq!(chart.range.values(), vec![8.0, 10.0]);
        assert_eq!(chart.range.limits.cl, 9.0);
        // 14.2 +/- 0.577 * 9 = 14.2 +/- 5.193
        assert_eq!(chart.mean.limits.ucl, 19.39);
        assert_eq!(chart.mean.limits.lcl, 9.01);
    }

    #[test]
    fn test_mean_range_selects_factors_by_capacity() {
        for capacity in MIN_CAPACITY..=MAX_CAPACITY {
            // One 1.0 and the rest 0.0: every subgroup range is exactly 1.
            let data: Vec<f64> = (0..capacity * 3)
                .map(|i| if i % capacity == 0 { 1.0 } else { 0.0 })
                .collect();
            let chart = mean_range_chart(&data, 3, capacity).expect("valid parameters");
            let f = factors(capacity).expect("covered");

            assert_eq!(chart.range.limits.cl, 1.0, "n={capacity}");
            assert_eq!(chart.range.limits.ucl, round(f.d4, 2), "n={capacity}");
            assert_eq!(chart.range.limits.lcl, round(f.d3, 2), "n={capacity}");
            let cl = chart.mean.limits.cl;
            assert_eq!(chart.mean.limits.ucl, round(add(cl, f.a2), 2), "n={capacity}");
            assert_eq!(chart.mean.limits.lcl, round(sub(cl, f.a2), 2), "n={capacity}");
        }
    }

    #[test]
    fn test_mean_range_constant_subgroups() {
        let chart = mean_range_chart(&[10.0; 6], 2, 3).expect("valid parameters");
        assert_eq!(chart.mean.limits.cl, 10.0);
        assert_eq!(chart.mean.limits.ucl, 10.0);
        assert_eq!(chart.mean.limits.lcl, 10.0);
        assert_eq!(chart.range.limits.ucl, 0.0);
    }

    #[test]
    fn test_mean_range_rejects_capacity_out_of_range() {
        for capacity in [0, 1, 26, 100] {
            let err = mean_range_chart(&[1.0; 60], 2, capacity).unwrap_err();
            assert!(
                matches!(
                    err,
                    SpcError::InvalidParameter {
                        parameter: "capacity",
                        ..
                    }
                ),
                "capacity {capacity}: {err}"
            );
        }
    }

    #[test]
    fn test_mean_range_rejects_nan() {
        let err = mean_range_chart(&[1.0, f64::NAN, 3.0, 4.0], 2, 2).unwrap_err();
        assert_eq!(err, SpcError::NonFiniteSample { index: 1 });
    }

    #[test]
    fn test_mean_range_needs_one_full_subgroup() {
        let err = mean_range_chart(&[1.0, 2.0, 3.0], 5, 4).unwrap_err();
        assert_eq!(err, SpcError::InsufficientData { needed: 4, got: 3 });

        let err = mean_range_chart(&[1.0, 2.0, 3.0, 4.0], 0, 2).unwrap_err();
        assert_eq!(err, SpcError::InsufficientData { needed: 2, got: 4 });
    }

    #[test]
    fn test_mean_range_no_notices_within_bands() {
        let chart = mean_range_chart(&reference_samples(), 25, 5).expect("valid parameters");
        assert!(chart.notices.is_empty(), "{:?}", chart.notices);
        assert_eq!(chart.subgroup_count(), 25);
    }

    #[test]
    fn test_mean_range_advisory_notices() {
        let data = reference_samples();
        let chart = mean_range_chart(&data, 10, 3).expect("advice is not fatal");
        assert_eq!(chart.notices.len(), 2);
        assert!(matches!(
            chart.notices[0],
            Notice::SubgroupCapacity {
                chart: ChartKind::MeanRange,
                capacity: 3,
                recommended_min: 4,
                recommended_max: Some(5),
            }
        ));
        assert!(matches!(
            chart.notices[1],
            Notice::SubgroupCount { count: 10, .. }
        ));
    }

    #[test]
    fn test_mean_range_shortfall_notice() {
        let data = reference_samples();
        let chart = mean_range_chart(&data[..100], 25, 5).expect("advice is not fatal");
        assert_eq!(chart.subgroup_count(), 20);
        assert_eq!(
            chart.notices,
            vec![Notice::SubgroupShortfall {
                chart: ChartKind::MeanRange,
                requested: 25,
                formed: 20,
            }]
        );
    }

    #[test]
    fn test_mean_range_custom_guidelines() {
        let guidelines = Guidelines {
            mean_range_capacity: crate::config::Band::new(2, 3),
            subgroup_count: crate::config::Band::new(1, 50),
            ..Guidelines::default()
        };
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let chart = mean_range_chart_with(&guidelines, &data, 2, 3).expect("valid parameters");
        assert!(chart.notices.is_empty());
    }

    // --- MeanStdDevChart ---

    #[test]
    fn test_mean_std_dev_limits() {
        let data = [10.0, 12.0, 14.0, 16.0, 18.0, 11.0, 13.0, 15.0, 17.0, 19.0];
        let chart = mean_std_dev_chart(&data, 2, 5).expect("valid parameters");

        assert_eq!(chart.mean.values(), vec![14.0, 15.0]);
        assert_eq!(chart.std_dev.values(), vec![3.16, 3.16]);
        assert_eq!(chart.mean.limits.cl, 14.5);
        // A3(5) = 1.427: 1.427 * 3.16 = 4.50932
        assert_eq!(chart.mean.limits.ucl, 19.01);
        assert_eq!(chart.mean.limits.lcl, 9.99);
        // B4(5) = 2.089, B3(5) = 0
        assert_eq!(chart.std_dev.limits.cl, 3.16);
        assert_eq!(chart.std_dev.limits.ucl, 6.6);
        assert_eq!(chart.std_dev.limits.lcl, 0.0);
    }

    #[test]
    fn test_mean_std_dev_selects_factors_by_capacity() {
        for capacity in MIN_CAPACITY..=MAX_CAPACITY {
            let data: Vec<f64> = (0..capacity * 2)
                .map(|i| if i % capacity == 0 { 1.0 } else { 0.0 })
                .collect();
            let chart = mean_std_dev_chart(&data, 2, capacity).expect("valid parameters");
            let f = factors(capacity).expect("covered");
            let s_bar = chart.std_dev.limits.cl;

            assert_eq!(chart.std_dev.limits.ucl, round(mul(f.b4, s_bar), 2), "n={capacity}");
            assert_eq!(chart.std_dev.limits.lcl, round(mul(f.b3, s_bar), 2), "n={capacity}");
            let cl = chart.mean.limits.cl;
            let half = mul(f.a3, s_bar);
            assert_eq!(chart.mean.limits.ucl, round(add(cl, half), 2), "n={capacity}");
            assert_eq!(chart.mean.limits.lcl, round(sub(cl, half), 2), "n={capacity}");
        }
    }

    #[test]
    fn test_mean_std_dev_capacity_notice() {
        let data: Vec<f64> = (0..300_i32).map(|i| f64::from(i % 7)).collect();

        let chart = mean_std_dev_chart(&data, 20, 12).expect("valid parameters");
        assert!(chart.notices.is_empty(), "{:?}", chart.notices);

        let chart = mean_std_dev_chart(&data, 20, 5).expect("advice is not fatal");
        assert_eq!(
            chart.notices,
            vec![Notice::SubgroupCapacity {
                chart: ChartKind::MeanStdDev,
                capacity: 5,
                recommended_min: 10,
                recommended_max: None,
            }]
        );
    }

    #[test]
    fn test_mean_std_dev_rejects_capacity_one() {
        let err = mean_std_dev_chart(&[1.0; 10], 5, 1).unwrap_err();
        assert!(matches!(err, SpcError::InvalidParameter { .. }));
    }

    #[test]
    fn test_trait_object_access() {
        let data = reference_samples();
        let charts: Vec<Box<dyn ControlChart>> = vec![
            Box::new(mean_range_chart(&data, 25, 5).expect("valid")),
            Box::new(mean_std_dev_chart(&data, 25, 5).expect("valid")),
        ];
        for chart in &charts {
            assert_eq!(chart.subgroup_count(), 25);
            assert_eq!(chart.dispersion().points.len(), 25);
            let l = &chart.location().limits;
            assert!(l.ucl >= l.cl && l.cl >= l.lcl);
        }
    }
}
