//! Assistant-backed search
//!
//! The preferred tier when enabled. An [`AgentSearch`] implementation asks
//! a conversational assistant for listings; the pipeline treats whatever
//! comes back as agent-provided results and only falls through when the
//! call errors or returns nothing usable.

use std::time::Duration;

use async_trait::async_trait;

use career_search_core::{Provenance, SearchCriteria, SearchResult};

use crate::error::SdkResult;
use crate::synthetic::SyntheticJobs;

/// A search backend driven by a conversational assistant.
///
/// Implementations are expected to be cheap to share behind an `Arc` and
/// safe to call concurrently.
#[async_trait]
pub trait AgentSearch: Send + Sync {
    /// Run the search through the assistant.
    async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult>;
}

/// An [`AgentSearch`] that fabricates plausible responses locally.
///
/// Useful for demos and tests when no assistant backend is wired up. It
/// waits a configurable moment to mimic a round trip, then returns
/// generated listings tagged as agent results.
pub struct SimulatedAgent {
    latency: Duration,
    default_location: String,
    generator: SyntheticJobs,
}

impl SimulatedAgent {
    /// Create an agent with a one second simulated round trip.
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(1),
            default_location: "Türkiye".to_string(),
            generator: SyntheticJobs::new(),
        }
    }

    /// Override the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Override the region used when the criteria carry no location.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }
}

impl Default for SimulatedAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentSearch for SimulatedAgent {
    async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult> {
        tokio::time::sleep(self.latency).await;

        let location = criteria.location.as_deref().unwrap_or(&self.default_location);
        let jobs = self.generator.generate(
            &criteria.query,
            location,
            criteria.effective_limit() as usize,
        );

        Ok(SearchResult::new(jobs, criteria.clone(), Provenance::Agent)
            .with_message("Results provided by the assistant"))
    }
}
