//! Coarse three-state indicator for the periodic status signal.
//!
//! Only CPU and memory usage feed the indicator: a danger-tier breach on
//! either is [`Indicator::Critical`], a warning-tier CPU breach is
//! [`Indicator::Attention`], anything else is [`Indicator::Normal`].

use serde::Serialize;

use crate::health::thresholds::Thresholds;
use crate::sample::MetricSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Normal,
    Attention,
    Critical,
}

impl Indicator {
    pub fn as_str(self) -> &'static str {
        match self {
            Indicator::Normal => "normal",
            Indicator::Attention => "attention",
            Indicator::Critical => "critical",
        }
    }
}

pub fn indicate(sample: &MetricSample, thresholds: &Thresholds) -> Indicator {
    if sample.cpu_usage >= thresholds.cpu_usage.danger
        || sample.mem_usage >= thresholds.mem_usage.danger
    {
        Indicator::Critical
    } else if sample.cpu_usage >= thresholds.cpu_usage.warning {
        Indicator::Attention
    } else {
        Indicator::Normal
    }
}

/// Short one-line summary, e.g. `CPU: 12.5% | 45°C | Mem: 30%`.
pub fn status_text(sample: &MetricSample) -> String {
    match sample.cpu_temp {
        Some(temp) => format!(
            "CPU: {}% | {}°C | Mem: {}%",
            sample.cpu_usage, temp, sample.mem_usage
        ),
        None => format!("CPU: {}% | Mem: {}%", sample.cpu_usage, sample.mem_usage),
    }
}
