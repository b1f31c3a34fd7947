//! Status reporting: connectivity, uptime, and memory.
//!
//! Connectivity is an explicit value produced by real checks (at startup
//! and after each analyze outcome) and read at report time; it is never
//! hardcoded. Reporting itself cannot fail: problems show up as state
//! values, not errors.

use pagelens_domain::ServiceState;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Instant;

/// Last known connectivity of the store and the model service.
#[derive(Debug)]
pub struct Connectivity {
    db: RwLock<ServiceState>,
    model: RwLock<ServiceState>,
}

impl Connectivity {
    /// Both collaborators start unchecked.
    pub fn new() -> Self {
        Self {
            db: RwLock::new(ServiceState::Unknown),
            model: RwLock::new(ServiceState::Unknown),
        }
    }

    /// Record the outcome of a store connectivity check.
    pub fn record_db(&self, ok: bool) {
        if let Ok(mut state) = self.db.write() {
            *state = ServiceState::from_check(ok);
        }
    }

    /// Record the outcome of a model connectivity check.
    pub fn record_model(&self, ok: bool) {
        if let Ok(mut state) = self.model.write() {
            *state = ServiceState::from_check(ok);
        }
    }

    /// Last known store state.
    pub fn db(&self) -> ServiceState {
        self.db.read().map(|s| *s).unwrap_or(ServiceState::Unknown)
    }

    /// Last known model state.
    pub fn model(&self) -> ServiceState {
        self.model.read().map(|s| *s).unwrap_or(ServiceState::Unknown)
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot returned by the health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Always "Running": a response at all means the backend is up
    #[serde(rename = "backendState")]
    pub backend_state: String,

    /// Last known store connectivity
    #[serde(rename = "dbState")]
    pub db_state: ServiceState,

    /// Last known model-service connectivity
    #[serde(rename = "modelState")]
    pub model_state: ServiceState,

    /// Seconds since process start
    #[serde(rename = "uptimeSeconds")]
    pub uptime_seconds: u64,

    /// Resident memory in megabytes (0 where unsupported)
    #[serde(rename = "memoryUsageMB")]
    pub memory_usage_mb: f64,
}

/// Build a status snapshot from the current connectivity and start time.
pub fn report(connectivity: &Connectivity, started_at: Instant) -> StatusSnapshot {
    StatusSnapshot {
        backend_state: "Running".to_string(),
        db_state: connectivity.db(),
        model_state: connectivity.model(),
        uptime_seconds: started_at.elapsed().as_secs(),
        memory_usage_mb: resident_memory_mb(),
    }
}

/// Resident set size in MB, read from /proc on Linux.
#[cfg(target_os = "linux")]
fn resident_memory_mb() -> f64 {
    let kb = std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|value| value.parse::<f64>().ok())
        })
        .unwrap_or(0.0);
    (kb / 1024.0 * 10.0).round() / 10.0
}

#[cfg(not(target_os = "linux"))]
fn resident_memory_mb() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_starts_unknown() {
        let connectivity = Connectivity::new();
        assert_eq!(connectivity.db(), ServiceState::Unknown);
        assert_eq!(connectivity.model(), ServiceState::Unknown);
    }

    #[test]
    fn test_record_outcomes() {
        let connectivity = Connectivity::new();

        connectivity.record_db(true);
        connectivity.record_model(false);
        assert_eq!(connectivity.db(), ServiceState::Connected);
        assert_eq!(connectivity.model(), ServiceState::Disconnected);

        connectivity.record_model(true);
        assert_eq!(connectivity.model(), ServiceState::Connected);
    }

    #[test]
    fn test_report_never_fails() {
        let connectivity = Connectivity::new();
        connectivity.record_db(true);

        let snapshot = report(&connectivity, Instant::now());
        assert_eq!(snapshot.backend_state, "Running");
        assert_eq!(snapshot.db_state, ServiceState::Connected);
        assert_eq!(snapshot.model_state, ServiceState::Unknown);
        assert!(snapshot.memory_usage_mb >= 0.0);
    }

    #[test]
    fn test_snapshot_json_keys() {
        let snapshot = report(&Connectivity::new(), Instant::now());
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"backendState\""));
        assert!(json.contains("\"dbState\""));
        assert!(json.contains("\"modelState\""));
        assert!(json.contains("\"uptimeSeconds\""));
        assert!(json.contains("\"memoryUsageMB\""));
    }
}
