//! Two-tier health evaluation.
//!
//! The danger pass runs first; any danger breach yields [`HealthLevel::Warning`]
//! and the caution pass is skipped entirely. Otherwise the caution pass runs
//! against the warning-tier limits. Both passes check conditions in the same
//! fixed order (alert, CPU usage, CPU temperature, GPU usage, GPU temperature,
//! memory usage), so reasons come out in that order.
//!
//! Absent readings never breach. The evaluator holds no state between calls.

use serde::{Serialize, Serializer};

use crate::alert::AlertSeverity;
use crate::health::thresholds::{MetricThreshold, Thresholds};
use crate::sample::MetricSample;

/// Overall classification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthLevel {
    Good,
    Caution,
    Warning,
}

impl HealthLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthLevel::Good => "GOOD",
            HealthLevel::Caution => "CAUTION",
            HealthLevel::Warning => "WARNING",
        }
    }

    /// Color paired one-to-one with the level.
    pub fn color(self) -> Color {
        match self {
            HealthLevel::Good => Color::Green,
            HealthLevel::Caution => Color::Yellow,
            HealthLevel::Warning => Color::Red,
        }
    }
}

impl std::fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Yellow,
    Red,
}

impl Color {
    /// 24-bit RGB value for presenters that take a numeric color.
    pub fn rgb(self) -> u32 {
        match self {
            Color::Green => 0x00ff00,
            Color::Yellow => 0xffff00,
            Color::Red => 0xff0000,
        }
    }
}

/// Why a classification is not GOOD. Variants are listed in evaluation order
/// within each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    CriticalAlert,
    CpuHighLoad,
    CpuHighTemp,
    GpuHighLoad,
    GpuHighTemp,
    MemoryShortage,
    CautionAlert,
    CpuLoadElevated,
    CpuTempRising,
    GpuLoadElevated,
    GpuTempRising,
    MemoryHigh,
}

impl Reason {
    pub fn label(self) -> &'static str {
        match self {
            Reason::CriticalAlert => "Monitoring-system critical alert",
            Reason::CpuHighLoad => "CPU high load",
            Reason::CpuHighTemp => "CPU high temperature",
            Reason::GpuHighLoad => "GPU high load",
            Reason::GpuHighTemp => "GPU high temperature",
            Reason::MemoryShortage => "Memory shortage",
            Reason::CautionAlert => "Monitoring-system caution alert",
            Reason::CpuLoadElevated => "CPU load elevated",
            Reason::CpuTempRising => "CPU temperature rising",
            Reason::GpuLoadElevated => "GPU load elevated",
            Reason::GpuTempRising => "GPU temperature rising",
            Reason::MemoryHigh => "Memory usage high",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Result of one evaluation. Built fresh every round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub level: HealthLevel,
    pub reasons: Vec<Reason>,
    pub color: Color,
}

impl Classification {
    fn new(level: HealthLevel, reasons: Vec<Reason>) -> Self {
        Self {
            level,
            reasons,
            color: level.color(),
        }
    }

    pub fn reason_labels(&self) -> Vec<&'static str> {
        self.reasons.iter().map(|r| r.label()).collect()
    }

    /// `"GOOD"` or `"LEVEL (reason, reason)"`.
    pub fn status_line(&self) -> String {
        if self.reasons.is_empty() {
            return self.level.as_str().to_string();
        }
        format!("{} ({})", self.level, self.reason_labels().join(", "))
    }
}

/// Which limit of a [`MetricThreshold`] a pass compares against.
#[derive(Debug, Clone, Copy)]
enum Tier {
    Danger,
    Caution,
}

impl Tier {
    fn limit(self, threshold: &MetricThreshold) -> f64 {
        match self {
            Tier::Danger => threshold.danger,
            Tier::Caution => threshold.warning,
        }
    }

    fn min_alert_severity(self) -> AlertSeverity {
        match self {
            Tier::Danger => AlertSeverity::Critical,
            Tier::Caution => AlertSeverity::Caution,
        }
    }

    /// Reasons in check order: alert, cpu usage, cpu temp, gpu usage,
    /// gpu temp, memory usage.
    fn reasons(self) -> [Reason; 6] {
        match self {
            Tier::Danger => [
                Reason::CriticalAlert,
                Reason::CpuHighLoad,
                Reason::CpuHighTemp,
                Reason::GpuHighLoad,
                Reason::GpuHighTemp,
                Reason::MemoryShortage,
            ],
            Tier::Caution => [
                Reason::CautionAlert,
                Reason::CpuLoadElevated,
                Reason::CpuTempRising,
                Reason::GpuLoadElevated,
                Reason::GpuTempRising,
                Reason::MemoryHigh,
            ],
        }
    }
}

/// Classify a sample against the thresholds and the merged alert severity.
pub fn evaluate(
    sample: &MetricSample,
    thresholds: &Thresholds,
    alert_severity: AlertSeverity,
) -> Classification {
    let danger = run_pass(Tier::Danger, sample, thresholds, alert_severity);
    if !danger.is_empty() {
        return Classification::new(HealthLevel::Warning, danger);
    }

    let caution = run_pass(Tier::Caution, sample, thresholds, alert_severity);
    if !caution.is_empty() {
        return Classification::new(HealthLevel::Caution, caution);
    }

    Classification::new(HealthLevel::Good, Vec::new())
}

fn run_pass(
    tier: Tier,
    sample: &MetricSample,
    thresholds: &Thresholds,
    alert_severity: AlertSeverity,
) -> Vec<Reason> {
    let checks = [
        alert_severity >= tier.min_alert_severity(),
        breaches(Some(sample.cpu_usage), &thresholds.cpu_usage, tier),
        breaches(sample.cpu_temp, &thresholds.cpu_temp, tier),
        breaches(sample.gpu_usage, &thresholds.gpu_usage, tier),
        breaches(sample.gpu_temp, &thresholds.gpu_temp, tier),
        breaches(Some(sample.mem_usage), &thresholds.mem_usage, tier),
    ];

    tier.reasons()
        .into_iter()
        .zip(checks)
        .filter_map(|(reason, hit)| hit.then_some(reason))
        .collect()
}

/// `true` when a present reading meets or exceeds the tier's limit.
fn breaches(value: Option<f64>, threshold: &MetricThreshold, tier: Tier) -> bool {
    value.is_some_and(|v| v >= tier.limit(threshold))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
