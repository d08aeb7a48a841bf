//! Agent configuration loaded from environment variables.
//!
//! | Variable                     | Required | Default                        |
//! |------------------------------|----------|--------------------------------|
//! | `GLANCES_API_URL`            | no       | `http://localhost:61208/api/4` |
//! | `API_TOKEN`                  | yes      | --                             |
//! | `UPDATE_INTERVAL_SECS`       | no       | `30` (minimum `10`)            |
//! | `HOST`                       | no       | `127.0.0.1`                    |
//! | `PORT`                       | no       | `8080`                         |
//! | `THRESHOLD_<METRIC>_<TIER>`  | no       | see [`Thresholds::default`]    |
//!
//! `<METRIC>` is one of `CPU_USAGE`, `CPU_TEMP`, `GPU_USAGE`, `GPU_TEMP`,
//! `MEM_USAGE`; `<TIER>` is `WARNING` or `DANGER`.

use std::time::Duration;

use hostwatch_core::error::CoreError;
use hostwatch_core::health::Thresholds;

pub const DEFAULT_GLANCES_API_URL: &str = "http://localhost:61208/api/4";

/// Default interval between periodic rounds.
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Polling faster than this risks upstream rate limits.
pub const MIN_INTERVAL_SECS: u64 = 10;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Thresholds(#[from] CoreError),
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Metrics API base URL, without a trailing slash.
    pub glances_url: String,
    /// Bearer token expected on the on-demand status endpoint.
    pub api_token: String,
    pub interval: Duration,
    pub host: String,
    pub port: u16,
    pub thresholds: Thresholds,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let glances_url = match lookup("GLANCES_API_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Missing("GLANCES_API_URL"))
            }
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => DEFAULT_GLANCES_API_URL.to_string(),
        };
        if let Err(e) = reqwest::Url::parse(&glances_url) {
            return Err(invalid("GLANCES_API_URL", &glances_url, e.to_string()));
        }

        let api_token = lookup("API_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("API_TOKEN"))?;

        let interval_secs: u64 = parse_or("UPDATE_INTERVAL_SECS", &lookup, DEFAULT_INTERVAL_SECS)?;
        if interval_secs < MIN_INTERVAL_SECS {
            return Err(invalid(
                "UPDATE_INTERVAL_SECS",
                &interval_secs.to_string(),
                format!("must be at least {MIN_INTERVAL_SECS} seconds"),
            ));
        }

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port: u16 = parse_or("PORT", &lookup, DEFAULT_PORT)?;

        let thresholds = load_thresholds(&lookup)?;

        Ok(Self {
            glances_url,
            api_token,
            interval: Duration::from_secs(interval_secs),
            host,
            port,
            thresholds,
        })
    }
}

/// Apply `THRESHOLD_*` overrides on top of the defaults and validate the result.
fn load_thresholds<F>(lookup: &F) -> Result<Thresholds, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut thresholds = Thresholds::default();
    for (name, _) in Thresholds::default().named() {
        let Some(threshold) = thresholds.get_mut(name) else {
            continue;
        };
        let prefix = format!("THRESHOLD_{}", name.to_ascii_uppercase());
        threshold.warning = parse_or(&format!("{prefix}_WARNING"), lookup, threshold.warning)?;
        threshold.danger = parse_or(&format!("{prefix}_DANGER"), lookup, threshold.danger)?;
    }
    thresholds.validate()?;
    Ok(thresholds)
}

fn parse_or<T, F>(var: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(var, &raw, e.to_string())),
    }
}

fn invalid(var: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        var: var.to_string(),
        value: value.to_string(),
        reason,
    }
}
