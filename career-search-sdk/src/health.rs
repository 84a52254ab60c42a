//! Backend health tracking
//!
//! The app checks backend health often, sometimes on every screen. The
//! cache keeps the last verdict so those checks cost nothing until the
//! caller forces a fresh probe or a search updates the picture.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Last known backend health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Backend answered a probe and reported itself healthy
    Healthy,
    /// Backend failed a probe or reported itself unhealthy
    Unhealthy,
    /// No probe has completed yet
    Unknown,
}

impl HealthState {
    /// Collapse to the boolean the app surfaces
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthState::Healthy)
    }
}

/// Cached health verdict, shared between searches and explicit checks.
///
/// There is no expiry: the value persists for the client lifetime and is
/// replaced only by a forced probe or a search outcome.
#[derive(Debug, Default)]
pub struct HealthCache {
    state: RwLock<Option<HealthState>>,
}

impl HealthCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            state: RwLock::new(None),
        }
    }

    /// Current verdict
    pub fn get(&self) -> HealthState {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        guard.unwrap_or(HealthState::Unknown)
    }

    /// Whether a verdict has been recorded
    pub fn is_cached(&self) -> bool {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        guard.is_some()
    }

    /// Record a probe or search outcome
    pub fn record(&self, healthy: bool) {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(if healthy {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        });
    }

    /// Forget the cached verdict
    pub fn invalidate(&self) {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

/// Body of the backend's health endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthResponse {
    /// True when the backend marks itself healthy
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
