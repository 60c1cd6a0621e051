//! Process capability analysis.
//!
//! Computes the capability indices relating the specification tolerance to
//! the observed process spread, and the binned frequency distribution with
//! its fitted normal curve that a capability chart draws.
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Capability corrected for centering, Cp (1 - K)
//! - **Cpu**, **Cpl** — One-sided capability against USL / LSL
//!
//! # References
//!
//! - SPC reference manual, 2nd ed., chapter IV.
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod chart;
mod indices;

pub use chart::{capability_chart, capability_chart_with, CapabilityBin, ProcessCapability};
pub use indices::{CapabilityIndices, NonconformingPpm, SpecLimits};
