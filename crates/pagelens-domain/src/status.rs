//! Connectivity states for status reporting

use serde::{Deserialize, Serialize};
use std::fmt;

/// Last known connectivity of a collaborator (store or model service).
///
/// Produced by an explicit check, never hardcoded. `Unknown` means no
/// check has completed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    /// Last check succeeded
    Connected,
    /// Last check failed
    Disconnected,
    /// No check has run yet
    Unknown,
}

impl ServiceState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Connected => "Connected",
            ServiceState::Disconnected => "Disconnected",
            ServiceState::Unknown => "Unknown",
        }
    }

    /// Derive a state from a check outcome.
    pub fn from_check(ok: bool) -> Self {
        if ok {
            ServiceState::Connected
        } else {
            ServiceState::Disconnected
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
