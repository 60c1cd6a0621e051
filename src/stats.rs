//! Descriptive statistics on the decimal-safe engine.
//!
//! These are the building blocks for every chart: subgroup means, ranges and
//! sample standard deviations. Following the handbook's presentation, means
//! and standard deviations are reported to 2 fractional digits.
//!
//! Functions return `None` when the input is too short for the statistic;
//! chart builders turn that into an [`SpcError`](crate::SpcError).

use crate::decimal::{add, div, mul, round, sub};

/// Fractional digits reported for means and standard deviations.
pub const STAT_DIGITS: u32 = 2;

/// Sum of all values, accumulated on the decimal engine.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().fold(0.0, |acc, &x| add(acc, x))
}

/// Arithmetic mean, rounded to 2 fractional digits.
///
/// Returns `None` for empty input.
///
/// # Examples
///
/// ```
/// use u_spc::stats::mean;
///
/// assert_eq!(mean(&[10.0, 12.0, 14.0, 16.0, 18.0]), Some(14.0));
/// assert_eq!(mean(&[1.0, 2.0, 2.0]), Some(1.67));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(round(div(sum(data), data.len() as f64), STAT_DIGITS))
}

/// Range (max - min), unrounded.
///
/// Returns `None` for empty input.
pub fn range(data: &[f64]) -> Option<f64> {
    let max = data.iter().copied().reduce(f64::max)?;
    let min = data.iter().copied().reduce(f64::min)?;
    Some(sub(max, min))
}

/// Sample standard deviation (n - 1 denominator), rounded to 2 fractional
/// digits.
///
/// The deviations are taken from the full-precision mean, not the rounded
/// one reported by [`mean`].
///
/// Returns `None` when fewer than 2 values are given.
///
/// # Examples
///
/// ```
/// use u_spc::stats::sample_std_dev;
///
/// assert_eq!(sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), Some(2.14));
/// assert_eq!(sample_std_dev(&[1.0]), None);
/// ```
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let avg = div(sum(data), n as f64);
    let squares = data.iter().fold(0.0, |acc, &x| {
        let dev = sub(x, avg);
        add(acc, mul(dev, dev))
    });
    let variance = div(squares, (n - 1) as f64);
    Some(round(variance.sqrt(), STAT_DIGITS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_is_decimal_exact() {
        assert_eq!(sum(&[0.1, 0.2, 0.3]), 0.6);
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn test_mean_rounds_to_two_digits() {
        assert_eq!(mean(&[1.0, 2.0]), Some(1.5));
        assert_eq!(mean(&[1.0, 2.0, 2.0]), Some(1.67));
        assert_eq!(mean(&[0.1, 0.2]), Some(0.15));
        assert_eq!(mean(&[18.0, 20.0, 10.0, 12.0, 14.0]), Some(14.8));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_range() {
        assert_eq!(range(&[10.0, 12.0, 14.0, 16.0, 18.0]), Some(8.0));
        assert_eq!(range(&[1.3, 0.1, 0.7]), Some(1.2));
        assert_eq!(range(&[5.0]), Some(0.0));
        assert_eq!(range(&[]), None);
    }

    #[test]
    fn test_sample_std_dev_textbook() {
        // Deviations -4, -2, 0, 2, 4: variance 40 / 4 = 10.
        assert_eq!(
            sample_std_dev(&[10.0, 12.0, 14.0, 16.0, 18.0]),
            Some(3.16)
        );
    }

    #[test]
    fn test_sample_std_dev_uses_full_precision_mean() {
        // Mean 4/3 does not terminate; squared deviations sum to 2/3.
        let sd = sample_std_dev(&[1.0, 1.0, 2.0]).expect("n >= 2");
        // sqrt(1/3) = 0.577...
        assert!((sd - 0.58).abs() < 1e-12, "sd = {sd}");
    }

    #[test]
    fn test_sample_std_dev_requires_two_values() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[3.0]), None);
        assert_eq!(sample_std_dev(&[3.0, 3.0]), Some(0.0));
    }
}
