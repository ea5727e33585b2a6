//! Health reporting types.

use serde::{Deserialize, Serialize};

/// Whether the configured handler could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

impl HealthState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthState::Healthy)
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "healthy"),
            HealthState::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Liveness report for a deployed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    /// The configured handler reference, verbatim.
    pub handler: String,
    /// Module half of the reference, or "unknown" if it is malformed.
    pub module: String,
    /// Function half of the reference, or "unknown" if it is malformed.
    pub function: String,
    pub version: String,
}
