//! Structured status report returned by the on-demand trigger.
//!
//! The report carries everything a presenter needs (title, overall status
//! line, per-metric readings with their tier marker, load averages and up to
//! [`MAX_DISPLAYED_ALERTS`] alert lines). Rendering it into a chat message or
//! any other format is the presenter's job.

use serde::Serialize;

use crate::alert::{AlertLine, MergedAlerts, MAX_DISPLAYED_ALERTS};
use crate::health::{Classification, Color, HealthLevel, MetricThreshold, Thresholds};
use crate::sample::MetricSample;
use crate::types::Timestamp;

pub const REPORT_TITLE: &str = "Server Status";

/// Tier marker for a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    /// No reading this round.
    Unknown,
    Normal,
    Elevated,
    Critical,
}

impl MetricStatus {
    pub fn of(value: Option<f64>, threshold: &MetricThreshold) -> Self {
        match value {
            None => MetricStatus::Unknown,
            Some(v) if v >= threshold.danger => MetricStatus::Critical,
            Some(v) if v >= threshold.warning => MetricStatus::Elevated,
            Some(_) => MetricStatus::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub value: Option<f64>,
    pub status: MetricStatus,
}

impl Reading {
    fn new(value: Option<f64>, threshold: &MetricThreshold) -> Self {
        Self {
            value,
            status: MetricStatus::of(value, threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuSection {
    pub usage_percent: Reading,
    pub temp_celsius: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuSection {
    pub usage_percent: Reading,
    pub temp_celsius: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySection {
    pub usage_percent: Reading,
    pub used_gib: f64,
    pub total_gib: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSection {
    pub min1: f64,
    pub min5: f64,
    pub min15: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub title: &'static str,
    pub level: HealthLevel,
    pub color: Color,
    pub color_rgb: u32,
    pub status_line: String,
    pub reasons: Vec<&'static str>,
    pub cpu: CpuSection,
    pub gpu: GpuSection,
    pub memory: MemorySection,
    pub load: LoadSection,
    /// First alert lines in input order; omitted when no alert contributed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<AlertLine>>,
    /// How many metrics endpoints answered this round. Zero means every
    /// reading above is a fallback value.
    pub sources_available: usize,
    pub generated_at: Timestamp,
}

impl StatusReport {
    pub fn build(
        sample: &MetricSample,
        thresholds: &Thresholds,
        alerts: &MergedAlerts,
        classification: &Classification,
        sources_available: usize,
        generated_at: Timestamp,
    ) -> Self {
        let alerts = (!alerts.lines.is_empty()).then(|| {
            alerts
                .lines
                .iter()
                .take(MAX_DISPLAYED_ALERTS)
                .cloned()
                .collect()
        });

        Self {
            title: REPORT_TITLE,
            level: classification.level,
            color: classification.color,
            color_rgb: classification.color.rgb(),
            status_line: classification.status_line(),
            reasons: classification.reason_labels(),
            cpu: CpuSection {
                usage_percent: Reading::new(Some(sample.cpu_usage), &thresholds.cpu_usage),
                temp_celsius: Reading::new(sample.cpu_temp, &thresholds.cpu_temp),
            },
            gpu: GpuSection {
                usage_percent: Reading::new(sample.gpu_usage, &thresholds.gpu_usage),
                temp_celsius: Reading::new(sample.gpu_temp, &thresholds.gpu_temp),
            },
            memory: MemorySection {
                usage_percent: Reading::new(Some(sample.mem_usage), &thresholds.mem_usage),
                used_gib: sample.mem_used_gib(),
                total_gib: sample.mem_total_gib(),
            },
            load: LoadSection {
                min1: sample.load1,
                min5: sample.load5,
                min15: sample.load15,
            },
            alerts,
            sources_available,
            generated_at,
        }
    }
}
