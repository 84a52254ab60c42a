//! Tiered search orchestration
//!
//! A search runs through an ordered list of strategies and returns the
//! first success. When every strategy fails the pipeline does not error:
//! it marks the backend unhealthy and answers with generated listings so
//! the caller always gets a renderable result.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use career_search_core::{Provenance, SearchCriteria, SearchResult};

use crate::agent::AgentSearch;
use crate::client::HttpClient;
use crate::error::{SdkError, SdkResult};
use crate::health::HealthCache;
use crate::resources::jobs::{JobSearchParams, SearchEnvelope};
use crate::retry::with_retry;
use crate::synthetic::SyntheticJobs;

/// One tier of the search fallback chain.
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// Attempt the search. An `Err` hands control to the next tier.
    async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult>;
}

/// Tier that delegates to a conversational assistant.
pub struct AgentStrategy {
    agent: Arc<dyn AgentSearch>,
}

impl AgentStrategy {
    /// Wrap an agent as a pipeline tier
    pub fn new(agent: Arc<dyn AgentSearch>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl SearchStrategy for AgentStrategy {
    fn name(&self) -> &str {
        "agent"
    }

    async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult> {
        let mut result = self.agent.search(criteria).await?;
        if !result.success || result.jobs.is_empty() {
            return Err(SdkError::Api {
                message: "Agent returned no usable listings".to_string(),
            });
        }
        // Whatever the agent labelled its payload, from this tier it is
        // agent-provided data.
        result.provenance = Provenance::Agent;
        Ok(result)
    }
}

/// Tier that calls the backend search endpoint directly, with retries.
pub struct DirectApiStrategy {
    http: Arc<HttpClient>,
    health: Arc<HealthCache>,
}

impl DirectApiStrategy {
    /// Create the tier against a shared HTTP client
    pub fn new(http: Arc<HttpClient>, health: Arc<HealthCache>) -> Self {
        Self { http, health }
    }
}

#[async_trait]
impl SearchStrategy for DirectApiStrategy {
    fn name(&self) -> &str {
        "direct-api"
    }

    async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult> {
        let params = JobSearchParams::from_criteria(criteria, self.http.config());
        let max_retries = self.http.config().max_retries;

        let envelope: SearchEnvelope = with_retry(max_retries, || {
            self.http.get_with_query("/api/jobs/search", &params)
        })
        .await?;

        if !envelope.success {
            let message = envelope
                .message
                .or(envelope.error)
                .unwrap_or_else(|| "Backend rejected the search".to_string());
            return Err(SdkError::Api { message });
        }

        self.health.record(true);
        Ok(envelope.into_result(criteria))
    }
}

/// Runs strategies in order and synthesizes a result when all of them fail.
pub struct SearchPipeline {
    strategies: Vec<Box<dyn SearchStrategy>>,
    generator: SyntheticJobs,
    health: Arc<HealthCache>,
    default_location: String,
}

impl SearchPipeline {
    /// Assemble a pipeline from ordered tiers. `default_location` is the
    /// region synthesized listings fall back to when the criteria carry
    /// no location.
    pub fn new(
        strategies: Vec<Box<dyn SearchStrategy>>,
        health: Arc<HealthCache>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            strategies,
            generator: SyntheticJobs::new(),
            health,
            default_location: default_location.into(),
        }
    }

    /// Run the chain. Never fails: exhaustion falls back to generated
    /// listings tagged [`Provenance::EnhancedMock`], with the last error
    /// folded into the result message.
    pub async fn run(&self, criteria: &SearchCriteria) -> SearchResult {
        let mut last_error: Option<SdkError> = None;

        for strategy in &self.strategies {
            info!("Trying {} search", strategy.name());
            match strategy.search(criteria).await {
                Ok(result) => {
                    info!(
                        "{} search returned {} listings",
                        strategy.name(),
                        result.jobs.len()
                    );
                    return result;
                }
                Err(err) => {
                    warn!("{} search failed: {}", strategy.name(), err);
                    last_error = Some(err);
                }
            }
        }

        self.health.record(false);
        self.synthesize(criteria, last_error)
    }

    fn synthesize(&self, criteria: &SearchCriteria, last_error: Option<SdkError>) -> SearchResult {
        let location = criteria
            .location
            .as_deref()
            .unwrap_or(&self.default_location);
        let jobs = self.generator.generate(
            &criteria.query,
            location,
            criteria.effective_limit() as usize,
        );

        let message = match last_error {
            Some(err) => format!(
                "Live search is unavailable ({}). Showing generated listings.",
                err
            ),
            None => "Live search is unavailable. Showing generated listings.".to_string(),
        };

        SearchResult::new(jobs, criteria.clone(), Provenance::EnhancedMock).with_message(message)
    }
}

impl fmt::Debug for SearchPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("SearchPipeline")
            .field("strategies", &names)
            .finish()
    }
}
