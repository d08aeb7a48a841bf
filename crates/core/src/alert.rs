//! Alerts reported by the monitored host's own alerting subsystem.
//!
//! [`merge_alerts`] folds the raw alert list into a single severity and a
//! display list. Truncation for presentation happens in
//! [`crate::report`], never here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of alert lines shown in a report.
pub const MAX_DISPLAYED_ALERTS: usize = 5;

/// State reported by the host for one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertState {
    Ok,
    Careful,
    Warning,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AlertState {
    /// Severity contributed by this state: 2 for critical, 1 for
    /// warning/careful, 0 otherwise.
    pub fn severity(self) -> AlertSeverity {
        match self {
            AlertState::Critical => AlertSeverity::Critical,
            AlertState::Warning | AlertState::Careful => AlertSeverity::Caution,
            AlertState::Ok | AlertState::Unknown => AlertSeverity::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertState::Ok => "OK",
            AlertState::Careful => "CAREFUL",
            AlertState::Warning => "WARNING",
            AlertState::Critical => "CRITICAL",
            AlertState::Unknown => "UNKNOWN",
        }
    }
}

/// One alert entry as read from the `alert` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub state: AlertState,
    pub kind: String,
    /// Average value over the alert window, when the host reports one.
    pub mean: Option<f64>,
}

const DEFAULT_ALERT_TYPE: &str = "General";

impl Alert {
    /// Read one entry field by field. Only non-object entries are rejected;
    /// a bad `type` or `mean` never hides the `state`.
    pub fn from_value(entry: &Value) -> Option<Self> {
        let fields = entry.as_object()?;

        let state = fields
            .get("state")
            .and_then(|v| AlertState::deserialize(v).ok())
            .unwrap_or_default();
        let kind = fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ALERT_TYPE)
            .to_string();
        let mean = fields
            .get("mean")
            .and_then(Value::as_f64)
            .or_else(|| fields.get("avg").and_then(Value::as_f64));

        Some(Self { state, kind, mean })
    }

    /// `"[STATE] type (value: mean)"`, without the value suffix when no
    /// mean was reported.
    pub fn display(&self) -> String {
        match self.mean {
            Some(mean) => format!("[{}] {} (value: {})", self.state.as_str(), self.kind, mean),
            None => format!("[{}] {}", self.state.as_str(), self.kind),
        }
    }
}

/// Merged alert severity, ordered so `max` picks the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    #[default]
    None = 0,
    Caution = 1,
    Critical = 2,
}

impl AlertSeverity {
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// A display entry for one alert that contributed a non-zero severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertLine {
    pub severity: AlertSeverity,
    pub text: String,
}

/// Result of merging a raw alert list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedAlerts {
    /// Maximum severity over all entries.
    pub severity: AlertSeverity,
    /// Display lines in input order, untruncated.
    pub lines: Vec<AlertLine>,
}

/// Parse the raw `alert` payload (absent or non-list means no alerts).
///
/// Non-object entries are skipped individually.
pub fn parse_alerts(payload: Option<&Value>) -> Vec<Alert> {
    let Some(entries) = payload.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let alert = Alert::from_value(entry);
            if alert.is_none() {
                tracing::debug!(entry = %entry, "Skipping malformed alert entry");
            }
            alert
        })
        .collect()
}

/// Reduce alerts to a severity and the display lines of the entries that
/// contributed to it.
pub fn merge_alerts(alerts: &[Alert]) -> MergedAlerts {
    let mut merged = MergedAlerts::default();
    for alert in alerts {
        let severity = alert.state.severity();
        if severity == AlertSeverity::None {
            continue;
        }
        merged.severity = merged.severity.max(severity);
        merged.lines.push(AlertLine {
            severity,
            text: alert.display(),
        });
    }
    merged
}
