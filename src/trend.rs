//! Trend charts.
//!
//! Trend charts plot samples against the time they were captured. No
//! aggregation happens: the input is validated and handed back in order.
//! Time keys are opaque to this crate and passed through unchanged.
//!
//! Only the first sample is checked for a time key. A sequence whose later
//! samples lack one is passed through as given.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpcError;

/// A measurement with the time it was captured.
///
/// `time` deserializes to `None` when the field is absent, so raw records
/// can be fed in without pre-validation.
///
/// # Examples
///
/// ```
/// use u_spc::trend::TimedSample;
///
/// let s: TimedSample<String> = serde_json::from_str(r#"{"value": 1.5}"#).unwrap();
/// assert!(s.time.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSample<T> {
    /// Capture time.
    pub time: Option<T>,
    /// Measured value.
    pub value: f64,
}

impl<T> TimedSample<T> {
    /// Creates a sample with a time key.
    pub fn new(time: T, value: f64) -> Self {
        Self {
            time: Some(time),
            value,
        }
    }
}

/// Samples in capture order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleTrendChart<T> {
    /// The validated samples.
    pub points: Vec<TimedSample<T>>,
}

/// Samples in capture order with the specification limits as reference
/// lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicTrendChart<T> {
    /// The validated samples.
    pub points: Vec<TimedSample<T>>,
    /// Upper specification limit.
    pub usl: f64,
    /// Lower specification limit.
    pub lsl: f64,
}

/// Builds a sample trend chart.
///
/// # Errors
///
/// - [`SpcError::InsufficientData`] for empty input
/// - [`SpcError::MissingTimeDimension`] if the first sample has no time key
///
/// # Examples
///
/// ```
/// use u_spc::sample_trend_chart;
/// use u_spc::trend::TimedSample;
///
/// let chart = sample_trend_chart(vec![
///     TimedSample::new("08:00", 10.2),
///     TimedSample::new("08:05", 10.4),
/// ])
/// .unwrap();
/// assert_eq!(chart.points[1].value, 10.4);
/// ```
pub fn sample_trend_chart<T>(samples: Vec<TimedSample<T>>) -> Result<SampleTrendChart<T>, SpcError> {
    validate(&samples)?;
    debug!(samples = samples.len(), "built sample trend chart");
    Ok(SampleTrendChart { points: samples })
}

/// Builds a basic trend chart carrying `usl` and `lsl` as reference lines.
///
/// The limits are echoed as given; equal limits draw a single target line.
///
/// # Errors
///
/// - [`SpcError::InsufficientData`] for empty input
/// - [`SpcError::MissingTimeDimension`] if the first sample has no time key
pub fn basic_trend_chart<T>(
    samples: Vec<TimedSample<T>>,
    usl: f64,
    lsl: f64,
) -> Result<BasicTrendChart<T>, SpcError> {
    validate(&samples)?;
    debug!(samples = samples.len(), usl, lsl, "built basic trend chart");
    Ok(BasicTrendChart {
        points: samples,
        usl,
        lsl,
    })
}

fn validate<T>(samples: &[TimedSample<T>]) -> Result<(), SpcError> {
    let first = samples
        .first()
        .ok_or(SpcError::InsufficientData { needed: 1, got: 0 })?;
    if first.time.is_none() {
        return Err(SpcError::MissingTimeDimension);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift() -> Vec<TimedSample<u32>> {
        vec![
            TimedSample::new(1, 10.1),
            TimedSample::new(2, 10.3),
            TimedSample::new(3, 9.8),
        ]
    }

    #[test]
    fn test_sample_trend_passes_through() {
        let chart = sample_trend_chart(shift()).expect("timed");
        assert_eq!(chart.points, shift());
    }

    #[test]
    fn test_basic_trend_echoes_limits() {
        let chart = basic_trend_chart(shift(), 10.5, 9.5).expect("timed");
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.usl, 10.5);
        assert_eq!(chart.lsl, 9.5);
    }

    #[test]
    fn test_missing_time_on_first_sample() {
        let mut samples = shift();
        samples[0].time = None;
        assert_eq!(
            sample_trend_chart(samples.clone()),
            Err(SpcError::MissingTimeDimension)
        );
        assert_eq!(
            basic_trend_chart(samples, 10.5, 9.5),
            Err(SpcError::MissingTimeDimension)
        );
    }

    #[test]
    fn test_only_first_sample_is_checked() {
        let mut samples = shift();
        samples[2].time = None;
        let chart = sample_trend_chart(samples).expect("first sample is timed");
        assert!(chart.points[2].time.is_none());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            sample_trend_chart::<u32>(Vec::new()),
            Err(SpcError::InsufficientData { needed: 1, got: 0 })
        );
    }

    #[test]
    fn test_basic_trend_echoes_limits_unchecked() {
        let chart = basic_trend_chart(shift(), 10.0, 10.0).expect("timed");
        assert_eq!(chart.points, shift());
        assert_eq!((chart.usl, chart.lsl), (10.0, 10.0));

        let chart = basic_trend_chart(shift(), 9.5, 10.5).expect("timed");
        assert_eq!((chart.usl, chart.lsl), (9.5, 10.5));
    }

    #[test]
    fn test_deserialize_records() {
        let raw = r#"[
            {"time": "2024-03-01T08:00:00Z", "value": 4.2},
            {"time": "2024-03-01T08:05:00Z", "value": 4.4}
        ]"#;
        let samples: Vec<TimedSample<String>> = serde_json::from_str(raw).expect("valid json");
        let chart = sample_trend_chart(samples).expect("timed");
        assert_eq!(chart.points[0].time.as_deref(), Some("2024-03-01T08:00:00Z"));

        let raw = r#"[{"value": 4.2}, {"time": "08:05", "value": 4.4}]"#;
        let samples: Vec<TimedSample<String>> = serde_json::from_str(raw).expect("valid json");
        assert_eq!(
            sample_trend_chart(samples),
            Err(SpcError::MissingTimeDimension)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let chart = basic_trend_chart(shift(), 10.5, 9.5).expect("timed");
        let json = serde_json::to_value(&chart).expect("serializable");
        assert_eq!(json["points"][0]["time"], 1);
        assert_eq!(json["usl"], 10.5);
    }
}
