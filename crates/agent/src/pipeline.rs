//! One evaluation round: fetch -> aggregate -> merge alerts -> evaluate.
//!
//! Both the on-demand report and the periodic scheduler call
//! [`Pipeline::run_round`]; neither path keeps anything between rounds.

use chrono::Utc;

use hostwatch_core::aggregate::aggregate;
use hostwatch_core::alert::{merge_alerts, parse_alerts, MergedAlerts};
use hostwatch_core::endpoint::{Endpoint, RawPayloads};
use hostwatch_core::health::{evaluate, indicate, status_text, Classification, Indicator, Thresholds};
use hostwatch_core::report::StatusReport;
use hostwatch_core::sample::MetricSample;
use hostwatch_core::types::Timestamp;

use crate::fetcher::GlancesClient;

/// Everything produced by one round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub sample: MetricSample,
    pub alerts: MergedAlerts,
    pub classification: Classification,
    /// Number of endpoints that returned a payload.
    pub sources_available: usize,
    pub completed_at: Timestamp,
}

/// Compact status published by the periodic path.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StatusUpdate {
    pub indicator: Indicator,
    pub text: String,
    pub at: Timestamp,
}

/// Read-only pipeline shared by the scheduler and request handlers.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: GlancesClient,
    thresholds: Thresholds,
}

impl Pipeline {
    pub fn new(client: GlancesClient, thresholds: Thresholds) -> Self {
        Self { client, thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Run one full round. Never fails: missing data degrades to defaults.
    pub async fn run_round(&self) -> RoundOutcome {
        let raw = self.client.fetch_all().await;
        let outcome = self.evaluate_payloads(&raw);

        if outcome.sources_available == 0 {
            tracing::warn!(
                base_url = %self.client.base_url(),
                "No metrics endpoint answered; classification uses fallback values",
            );
        } else if outcome.sources_available < Endpoint::ALL.len() {
            tracing::debug!(
                sources_available = outcome.sources_available,
                "Partial metrics round",
            );
        }

        outcome
    }

    /// Pure half of a round, separated so it can be driven without HTTP.
    pub fn evaluate_payloads(&self, raw: &RawPayloads) -> RoundOutcome {
        let sample = aggregate(raw);
        let alerts = merge_alerts(&parse_alerts(raw.alert.as_ref()));
        let classification = evaluate(&sample, &self.thresholds, alerts.severity);

        RoundOutcome {
            sample,
            alerts,
            classification,
            sources_available: raw.available(),
            completed_at: Utc::now(),
        }
    }

    /// On-demand entry point: one round rendered into a report.
    pub async fn report(&self) -> StatusReport {
        let outcome = self.run_round().await;
        self.build_report(&outcome)
    }

    pub fn build_report(&self, outcome: &RoundOutcome) -> StatusReport {
        StatusReport::build(
            &outcome.sample,
            &self.thresholds,
            &outcome.alerts,
            &outcome.classification,
            outcome.sources_available,
            outcome.completed_at,
        )
    }

    /// Collapse a round into the coarse periodic indicator.
    pub fn status_update(&self, outcome: &RoundOutcome) -> StatusUpdate {
        StatusUpdate {
            indicator: indicate(&outcome.sample, &self.thresholds),
            text: status_text(&outcome.sample),
            at: outcome.completed_at,
        }
    }
}
