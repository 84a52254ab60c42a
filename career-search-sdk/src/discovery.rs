//! Endpoint discovery
//!
//! The backend may be reachable on any of several hosts depending on
//! where the app is running. The resolver probes the candidates in
//! priority order and the client locks onto the first one that answers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{SdkError, SdkResult};

/// Probes candidate endpoints and reports the first reachable one.
#[derive(Debug)]
pub struct EndpointResolver {
    client: Client,
    probe_timeout: Duration,
}

impl EndpointResolver {
    /// Create a resolver with the given per-probe timeout
    pub fn new(probe_timeout: Duration) -> SdkResult<Self> {
        let client = Client::builder()
            .timeout(probe_timeout)
            .build()
            .map_err(SdkError::Network)?;

        Ok(Self {
            client,
            probe_timeout,
        })
    }

    /// Probe `candidates` in order and return the first that answers with
    /// a success status, or `None` when every candidate fails. Probe
    /// failures are logged and never escalate into errors.
    pub async fn resolve(&self, candidates: &[String]) -> Option<String> {
        for candidate in candidates {
            debug!("Probing endpoint {}", candidate);
            match self.probe(candidate).await {
                Ok(()) => {
                    info!("Endpoint {} is reachable", candidate);
                    return Some(candidate.clone());
                }
                Err(err) => {
                    warn!("Endpoint {} failed probe: {}", candidate, err);
                }
            }
        }

        warn!("No candidate endpoint answered");
        None
    }

    async fn probe(&self, base_url: &str) -> SdkResult<()> {
        let url = format!("{}/", base_url.trim_end_matches('/'));

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(SdkError::Timeout(self.probe_timeout)),
            Err(e) => return Err(SdkError::Network(e)),
        };

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SdkError::Http {
                status: status.as_u16(),
                message: format!("probe returned {}", status),
            })
        }
    }
}

/// Tracks whether discovery has run for a client instance.
///
/// The guard is a plain swap, not a lock: two tasks racing the first
/// search may both probe, and the later writer wins. In-flight requests
/// keep the endpoint they started with.
#[derive(Debug, Default)]
pub struct DiscoveryState {
    completed: AtomicBool,
}

impl DiscoveryState {
    /// Create a fresh, not-yet-run state
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the discovery run. Returns `false` when it already ran.
    pub fn begin(&self) -> bool {
        !self.completed.swap(true, Ordering::SeqCst)
    }

    /// Allow discovery to run again
    pub fn reset(&self) {
        self.completed.store(false, Ordering::SeqCst);
    }

    /// Whether a discovery run has been claimed
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}
