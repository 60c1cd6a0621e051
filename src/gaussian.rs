//! Normal distribution functions for capability charts.
//!
//! # Density
//!
//! ```text
//! f(x) = exp(-(x - μ)² / 2σ²) / (σ √(2π))
//! ```
//!
//! The exponent and the normalizing denominator are evaluated on the
//! decimal-safe engine; the result is rounded to 3 fractional digits, the
//! resolution at which capability charts plot the fitted curve.
//!
//! # Cumulative distribution
//!
//! Polynomial approximation (Zelen & Severo) with absolute error below
//! 7.5e-8:
//!
//! ```text
//! t = 1 / (1 + p|z|)
//! Q(z) = φ(z) (b₁t + b₂t² + b₃t³ + b₄t⁴ + b₅t⁵)
//! Φ(z) = 1 - Q(z) for z > 0, Q(z) otherwise
//! ```
//!
//! # Reference
//!
//! Abramowitz, M. & Stegun, I.A. (1964). *Handbook of Mathematical
//! Functions*, formula 26.2.17.

use std::f64::consts::PI;

use crate::decimal::{div, mul, round, sub};

/// Fractional digits reported for density values.
pub const DENSITY_DIGITS: u32 = 3;

const P: f64 = 0.2316419;
const B1: f64 = 0.31938153;
const B2: f64 = -0.356563782;
const B3: f64 = 1.781477937;
const B4: f64 = -1.821255978;
const B5: f64 = 1.330274429;

/// Normal probability density at `x`, rounded to 3 fractional digits.
///
/// # Examples
///
/// ```
/// use u_spc::gaussian::density;
///
/// assert_eq!(density(0.0, 0.0, 1.0), 0.399);
/// assert_eq!(density(1.0, 0.0, 1.0), 0.242);
/// ```
pub fn density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let deviation = sub(x, mean);
    let variance = mul(std_dev, std_dev);
    let exponent = div(mul(deviation, deviation), mul(2.0, variance));
    let normalizer = mul(mul(2.0, PI).sqrt(), std_dev);
    round(div((-exponent).exp(), normalizer), DENSITY_DIGITS)
}

/// Normal cumulative distribution at `x` (approximation-grade).
///
/// Returns exactly `0.5` when `x == mean`.
///
/// # Examples
///
/// ```
/// use u_spc::gaussian::cumulative;
///
/// assert_eq!(cumulative(10.0, 10.0, 2.0), 0.5);
/// assert!((cumulative(1.96, 0.0, 1.0) - 0.975).abs() < 1e-4);
/// ```
pub fn cumulative(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    if z == 0.0 {
        return 0.5;
    }
    let t = 1.0 / (1.0 + P * z.abs());
    let pdf = (-0.5 * z * z).exp() / (2.0 * PI).sqrt();
    let tail = pdf * t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
    if z > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Evaluates either [`cumulative`] or [`density`].
pub fn norm_dist(x: f64, mean: f64, std_dev: f64, cumulative: bool) -> f64 {
    if cumulative {
        self::cumulative(x, mean, std_dev)
    } else {
        density(x, mean, std_dev)
    }
}
