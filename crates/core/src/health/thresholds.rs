//! Per-metric warning/danger thresholds.
//!
//! Loaded once at startup and shared read-only by every evaluation.

use serde::Serialize;

use crate::error::CoreError;

/// Warning (caution tier) and danger tier limits for one metric.
///
/// A reading breaches a tier when it is greater than or equal to the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricThreshold {
    pub warning: f64,
    pub danger: f64,
}

impl MetricThreshold {
    pub const fn new(warning: f64, danger: f64) -> Self {
        Self { warning, danger }
    }

    /// Check both limits are finite, non-negative and ordered.
    pub fn validate(&self, name: &str) -> Result<(), CoreError> {
        for (tier, value) in [("warning", self.warning), ("danger", self.danger)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{name} {tier} threshold must be a non-negative number, got {value}"
                )));
            }
        }
        if self.warning > self.danger {
            return Err(CoreError::Validation(format!(
                "{name} warning threshold ({}) must not exceed danger threshold ({})",
                self.warning, self.danger
            )));
        }
        Ok(())
    }
}

/// Threshold set for every evaluated metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub cpu_usage: MetricThreshold,
    pub cpu_temp: MetricThreshold,
    pub gpu_usage: MetricThreshold,
    pub gpu_temp: MetricThreshold,
    pub mem_usage: MetricThreshold,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu_usage: MetricThreshold::new(75.0, 90.0),
            cpu_temp: MetricThreshold::new(80.0, 100.0),
            // Danger above 100% never fires; sustained full GPU load is normal.
            gpu_usage: MetricThreshold::new(80.0, 101.0),
            gpu_temp: MetricThreshold::new(80.0, 90.0),
            mem_usage: MetricThreshold::new(75.0, 90.0),
        }
    }
}

impl Thresholds {
    /// Named view over every metric, in evaluation order.
    pub fn named(&self) -> [(&'static str, &MetricThreshold); 5] {
        [
            ("cpu_usage", &self.cpu_usage),
            ("cpu_temp", &self.cpu_temp),
            ("gpu_usage", &self.gpu_usage),
            ("gpu_temp", &self.gpu_temp),
            ("mem_usage", &self.mem_usage),
        ]
    }

    /// Mutable access by metric name, used when applying overrides.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut MetricThreshold> {
        match name {
            "cpu_usage" => Some(&mut self.cpu_usage),
            "cpu_temp" => Some(&mut self.cpu_temp),
            "gpu_usage" => Some(&mut self.gpu_usage),
            "gpu_temp" => Some(&mut self.gpu_temp),
            "mem_usage" => Some(&mut self.mem_usage),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.named()
            .iter()
            .try_for_each(|(name, threshold)| threshold.validate(name))
    }
}
