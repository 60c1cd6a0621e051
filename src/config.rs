//! Recommended chart parameters.
//!
//! [`Guidelines`] collects the bands the quality-control handbook (SPC
//! reference manual, 2nd ed.) recommends for each chart. Builders compare
//! their inputs against these bands and raise [`Notice`](crate::Notice)s; the
//! only value that changes a computation is the default sigma multiple of
//! the capability chart.
//!
//! The struct deserializes with every field optional, so callers can load a
//! partial override:
//!
//! ```
//! use u_spc::Guidelines;
//!
//! let g: Guidelines = serde_json::from_str(r#"{ "histogram_min_samples": 100 }"#).unwrap();
//! assert_eq!(g.histogram_min_samples, 100);
//! assert_eq!(g.subgroup_count.min, 20);
//! ```

use serde::{Deserialize, Serialize};

/// An inclusive `min..=max` band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Lower bound (inclusive).
    pub min: usize,
    /// Upper bound (inclusive).
    pub max: usize,
}

impl Band {
    /// Creates a band.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the band.
    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Recommended parameter bands and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guidelines {
    /// Recommended subgroup capacity for the mean-range chart.
    pub mean_range_capacity: Band,
    /// Smallest recommended subgroup capacity for the mean-std-dev chart.
    pub mean_std_dev_min_capacity: usize,
    /// Recommended number of subgroups for both subgroup charts.
    pub subgroup_count: Band,
    /// Smallest recommended sample count for a histogram.
    pub histogram_min_samples: usize,
    /// Sigma multiple spanning the capability chart's bins when the caller
    /// does not give one.
    pub sigma_multiple: f64,
}

impl Default for Guidelines {
    fn default() -> Self {
        Self {
            mean_range_capacity: Band::new(4, 5),
            mean_std_dev_min_capacity: 10,
            subgroup_count: Band::new(20, 25),
            histogram_min_samples: 50,
            sigma_multiple: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_contains() {
        let band = Band::new(4, 5);
        assert!(!band.contains(3));
        assert!(band.contains(4));
        assert!(band.contains(5));
        assert!(!band.contains(6));
    }

    #[test]
    fn test_defaults() {
        let g = Guidelines::default();
        assert_eq!(g.mean_range_capacity, Band::new(4, 5));
        assert_eq!(g.mean_std_dev_min_capacity, 10);
        assert_eq!(g.subgroup_count, Band::new(20, 25));
        assert_eq!(g.histogram_min_samples, 50);
        assert!((g.sigma_multiple - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let g: Guidelines = serde_json::from_str(
            r#"{ "sigma_multiple": 4.0, "mean_range_capacity": { "min": 3, "max": 6 } }"#,
        )
        .expect("valid json");
        assert!((g.sigma_multiple - 4.0).abs() < f64::EPSILON);
        assert_eq!(g.mean_range_capacity, Band::new(3, 6));
        assert_eq!(g.histogram_min_samples, 50);
    }

    #[test]
    fn test_round_trip_json() {
        let g = Guidelines::default();
        let json = serde_json::to_string(&g).expect("serializable");
        let back: Guidelines = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(g, back);
    }
}
