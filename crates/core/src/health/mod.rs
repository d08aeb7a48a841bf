//! Host health classification.
//!
//! Contains the threshold configuration, the two-tier evaluator and the
//! coarse indicator used by the periodic status path. All logic in this
//! module is pure so it can be tested in isolation.

pub mod evaluator;
pub mod indicator;
pub mod thresholds;

pub use evaluator::{evaluate, Classification, Color, HealthLevel, Reason};
pub use indicator::{indicate, status_text, Indicator};
pub use thresholds::{MetricThreshold, Thresholds};
