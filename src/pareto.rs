//! Pareto (permutation) chart.
//!
//! Counts each distinct value and its share of all occurrences. Values are
//! reported in order of first appearance, and the percentage is per value,
//! not a running total. For the classic cumulative line, sort by frequency
//! and accumulate with [`cumulative_percentages`].
//!
//! # Examples
//!
//! ```
//! use u_spc::pareto_chart;
//!
//! let points = pareto_chart(&[1, 1, 2, 3, 3, 3]);
//! let values: Vec<i32> = points.iter().map(|p| p.value).collect();
//! let pct: Vec<f64> = points.iter().map(|p| p.percentage).collect();
//!
//! assert_eq!(values, [1, 2, 3]);
//! assert_eq!(pct, [33.33, 16.67, 50.0]);
//! ```

use serde::Serialize;

use crate::decimal::{add, div, mul, round};

/// Fractional digits reported for percentages.
const PERCENT_DIGITS: u32 = 2;

/// One distinct value of a Pareto chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoPoint<T> {
    /// The distinct value.
    pub value: T,
    /// Number of occurrences.
    pub frequency: usize,
    /// `100 * frequency / total`, rounded to 2 fractional digits.
    pub percentage: f64,
}

/// Counts the distinct values of `samples`.
///
/// Values are grouped by `==`, so for floats every `NaN` is a distinct value
/// with frequency 1, and `0.0` and `-0.0` share a group. Filter non-finite
/// values first if that matters.
///
/// Returns an empty vector for empty input.
pub fn pareto_chart<T: PartialEq + Clone>(samples: &[T]) -> Vec<ParetoPoint<T>> {
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for sample in samples {
        match counts.iter_mut().find(|(value, _)| *value == sample) {
            Some((_, count)) => *count += 1,
            None => counts.push((sample, 1)),
        }
    }

    let total = samples.len() as f64;
    counts
        .into_iter()
        .map(|(value, frequency)| ParetoPoint {
            value: value.clone(),
            frequency,
            percentage: round(
                mul(div(frequency as f64, total), 100.0),
                PERCENT_DIGITS,
            ),
        })
        .collect()
}

/// Sorts `points` by descending frequency (stable) and returns the running
/// percentage alongside each point.
///
/// # Examples
///
/// ```
/// use u_spc::pareto::{cumulative_percentages, pareto_chart};
///
/// let sorted = cumulative_percentages(pareto_chart(&["a", "b", "b", "c", "b", "a"]));
/// let order: Vec<&str> = sorted.iter().map(|(p, _)| p.value).collect();
/// let running: Vec<f64> = sorted.iter().map(|(_, c)| *c).collect();
///
/// assert_eq!(order, ["b", "a", "c"]);
/// assert_eq!(running, [50.0, 83.33, 100.0]);
/// ```
pub fn cumulative_percentages<T>(mut points: Vec<ParetoPoint<T>>) -> Vec<(ParetoPoint<T>, f64)> {
    points.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    let mut running = 0.0;
    points
        .into_iter()
        .map(|point| {
            running = add(running, point.percentage);
            (point, running)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let points = pareto_chart(&[1, 1, 2, 3, 3, 3]);
        assert_eq!(
            points,
            vec![
                ParetoPoint { value: 1, frequency: 2, percentage: 33.33 },
                ParetoPoint { value: 2, frequency: 1, percentage: 16.67 },
                ParetoPoint { value: 3, frequency: 3, percentage: 50.0 },
            ]
        );
    }

    #[test]
    fn test_categorical_values() {
        let defects = ["scratch", "dent", "scratch", "crack", "scratch", "dent", "chip"];
        let points = pareto_chart(&defects);
        let values: Vec<&str> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, ["scratch", "dent", "crack", "chip"]);
        assert_eq!(points[0].frequency, 3);
        // 3 / 7
        assert_eq!(points[0].percentage, 42.86);
        assert_eq!(points[3].percentage, 14.29);
    }

    #[test]
    fn test_float_values() {
        let points = pareto_chart(&[0.1, 0.2, 0.1, 0.1]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].percentage, 75.0);
        assert_eq!(points[1].percentage, 25.0);
    }

    #[test]
    fn test_nan_is_never_grouped() {
        let points = pareto_chart(&[f64::NAN, 1.0, f64::NAN, 1.0]);
        assert_eq!(points.len(), 3);
        assert!(points[0].value.is_nan());
        assert_eq!(points[0].frequency, 1);
        assert_eq!(points[1].frequency, 2);
        assert_eq!(points[1].percentage, 50.0);
        assert!(points[2].value.is_nan());
    }

    #[test]
    fn test_single_value() {
        let points = pareto_chart(&["ok"; 5]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].percentage, 100.0);
    }

    #[test]
    fn test_empty() {
        assert!(pareto_chart::<i32>(&[]).is_empty());
        assert!(cumulative_percentages::<i32>(Vec::new()).is_empty());
    }

    #[test]
    fn test_cumulative_is_stable_for_ties() {
        let sorted = cumulative_percentages(pareto_chart(&[4, 5, 5, 6, 6]));
        let order: Vec<i32> = sorted.iter().map(|(p, _)| p.value).collect();
        assert_eq!(order, [5, 6, 4]);
        assert_eq!(sorted[2].1, 100.0);
    }
}
