//! Metrics API endpoint names and the per-round payload bundle.
//!
//! Paths are relative to the configured base URL, e.g.
//! `http://localhost:61208/api/4` + `/cpu/total`.

use serde_json::Value;

/// One metrics API endpoint queried every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CpuTotal,
    Mem,
    Load,
    Sensors,
    Gpu,
    Alert,
}

impl Endpoint {
    /// Every endpoint, in the order a round fetches them.
    pub const ALL: [Endpoint; 6] = [
        Endpoint::CpuTotal,
        Endpoint::Mem,
        Endpoint::Load,
        Endpoint::Sensors,
        Endpoint::Gpu,
        Endpoint::Alert,
    ];

    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::CpuTotal => "cpu/total",
            Endpoint::Mem => "mem",
            Endpoint::Load => "load",
            Endpoint::Sensors => "sensors",
            Endpoint::Gpu => "gpu",
            Endpoint::Alert => "alert",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Raw JSON payloads collected in one round, one slot per endpoint.
///
/// `None` means the endpoint was unreachable, timed out, answered with a
/// non-200 status or returned a body that was not JSON.
#[derive(Debug, Clone, Default)]
pub struct RawPayloads {
    pub cpu: Option<Value>,
    pub mem: Option<Value>,
    pub load: Option<Value>,
    pub sensors: Option<Value>,
    pub gpu: Option<Value>,
    pub alert: Option<Value>,
}

impl RawPayloads {
    /// Store a payload in the slot belonging to `endpoint`.
    pub fn set(&mut self, endpoint: Endpoint, payload: Option<Value>) {
        let slot = match endpoint {
            Endpoint::CpuTotal => &mut self.cpu,
            Endpoint::Mem => &mut self.mem,
            Endpoint::Load => &mut self.load,
            Endpoint::Sensors => &mut self.sensors,
            Endpoint::Gpu => &mut self.gpu,
            Endpoint::Alert => &mut self.alert,
        };
        *slot = payload;
    }

    /// Number of endpoints that produced a payload this round.
    pub fn available(&self) -> usize {
        [
            &self.cpu,
            &self.mem,
            &self.load,
            &self.sensors,
            &self.gpu,
            &self.alert,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_api_layout() {
        let paths: Vec<&str> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths, ["cpu/total", "mem", "load", "sensors", "gpu", "alert"]);
    }

    #[test]
    fn set_fills_matching_slot() {
        let mut raw = RawPayloads::default();
        assert_eq!(raw.available(), 0);

        raw.set(Endpoint::Gpu, Some(serde_json::json!([])));
        raw.set(Endpoint::Mem, None);

        assert!(raw.gpu.is_some());
        assert!(raw.mem.is_none());
        assert_eq!(raw.available(), 1);
    }
}
