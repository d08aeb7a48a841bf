//! Canonical per-round metrics snapshot.

use serde::Serialize;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One round's worth of host telemetry after normalization.
///
/// Usage fields default to `0` when their endpoint produced nothing, while
/// temperature and GPU readings stay `None`. A `None` reading never breaches
/// a threshold; a defaulted `0` simply sits below every threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    /// Total CPU utilisation, 0-100.
    pub cpu_usage: f64,
    /// CPU package temperature in degrees Celsius.
    pub cpu_temp: Option<f64>,
    /// Utilisation of the first GPU, 0-100.
    pub gpu_usage: Option<f64>,
    /// Temperature of the first GPU in degrees Celsius.
    pub gpu_temp: Option<f64>,
    /// Memory utilisation, 0-100.
    pub mem_usage: f64,
    pub mem_used_bytes: u64,
    /// Defaults to 1 so ratios never divide by zero.
    pub mem_total_bytes: u64,
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

impl Default for MetricSample {
    fn default() -> Self {
        Self {
            cpu_usage: 0.0,
            cpu_temp: None,
            gpu_usage: None,
            gpu_temp: None,
            mem_usage: 0.0,
            mem_used_bytes: 0,
            mem_total_bytes: 1,
            load1: 0.0,
            load5: 0.0,
            load15: 0.0,
        }
    }
}

impl MetricSample {
    /// Used memory in GiB, rounded to two decimals. Display only.
    pub fn mem_used_gib(&self) -> f64 {
        bytes_to_gib(self.mem_used_bytes)
    }

    /// Total memory in GiB, rounded to two decimals. Display only.
    pub fn mem_total_gib(&self) -> f64 {
        bytes_to_gib(self.mem_total_bytes)
    }
}

/// Convert bytes to GiB (1024^3) rounded to two decimal places.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    let gib = bytes as f64 / BYTES_PER_GIB;
    (gib * 100.0).round() / 100.0
}
