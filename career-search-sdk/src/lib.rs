//! Career Search SDK
//!
//! This crate provides a resilient Rust client for the career search
//! backend. The backend runs on developer machines and flaky networks, so
//! the client is built to degrade instead of failing: it discovers which
//! candidate endpoint is reachable, retries transient faults, and falls
//! back to agent-provided or generated listings when the live API cannot
//! answer.
//!
//! # Features
//!
//! - **Endpoint discovery**: Probes candidate base URLs in priority order
//!   and routes requests to the first one that answers
//! - **Tiered fallback**: Agent search, then the direct API with retries,
//!   then locally generated listings; searches never fail for network
//!   reasons
//! - **Provenance tracking**: Every result says which tier produced it
//! - **Automatic retries**: Exponential backoff for transient faults only
//! - **Health caching**: One probe verdict is reused until invalidated
//! - **Typed errors**: Detailed error types with retryability
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use career_search_sdk::{CareerSearchClient, ClientConfig, SearchCriteria};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CareerSearchClient::new(ClientConfig::default())?;
//!
//!     // Find a reachable endpoint before the first search
//!     client.discover().await;
//!
//!     let criteria = SearchCriteria::new("React Developer")
//!         .with_location("İstanbul")
//!         .with_limit(5);
//!
//!     let results = client.search(&criteria).await?;
//!     println!(
//!         "{} listings ({} total matches, source: {})",
//!         results.jobs.len(),
//!         results.total_results,
//!         results.provenance.as_str()
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The client can be configured in code, from `config/career-search.toml`,
//! or from `CAREER_SEARCH_*` environment variables:
//!
//! ```rust,no_run
//! use career_search_sdk::{CareerSearchClient, ClientConfig};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), career_search_sdk::SdkError> {
//! let client = CareerSearchClient::builder()
//!     .with_endpoints(["http://localhost:5000"])
//!     .with_timeout(Duration::from_secs(10))
//!     .with_max_retries(2)
//!     .build()?;
//!
//! // Or pick up file and environment settings
//! let from_env = CareerSearchClient::new(ClientConfig::load()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Searches only fail for invalid criteria; everything else degrades into
//! a result whose provenance says what happened. Lower-level calls expose
//! the full error taxonomy:
//!
//! ```rust,no_run
//! use career_search_sdk::{CareerSearchClient, SdkError, SearchCriteria};
//!
//! async fn handle_errors(client: &CareerSearchClient) {
//!     match client.search(&SearchCriteria::new("")).await {
//!         Ok(results) => println!("Got {} listings", results.jobs.len()),
//!         Err(SdkError::Validation(msg)) => eprintln!("Bad criteria: {}", msg),
//!         Err(e) => eprintln!("Other error: {}", e),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod agent;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fallback;
pub mod health;
pub mod resources;
pub mod retry;
pub mod synthetic;

// Re-export main types for convenience
pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_ENDPOINTS};
pub use error::{SdkError, SdkResult};

// Re-export the resilience building blocks
pub use agent::{AgentSearch, SimulatedAgent};
pub use discovery::{DiscoveryState, EndpointResolver};
pub use fallback::{AgentStrategy, DirectApiStrategy, SearchPipeline, SearchStrategy};
pub use health::{HealthCache, HealthState};
pub use resources::jobs::{JobDetails, JobsClient};
pub use retry::with_retry;
pub use synthetic::SyntheticJobs;

// Re-export the domain types the client speaks in
pub use career_search_core::{
    CoreError, JobListing, Provenance, SearchCriteria, SearchResult, DEFAULT_LIMIT,
};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::health::HealthResponse;

/// The main client for the career search backend.
///
/// The client bundles endpoint discovery, the health cache, and the
/// tiered search pipeline behind one handle. It is cheap to clone; clones
/// share the discovered endpoint and the cached health verdict.
///
/// # Example
///
/// ```rust,no_run
/// use career_search_sdk::{CareerSearchClient, ClientConfig, SearchCriteria};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CareerSearchClient::new(ClientConfig::default())?;
///
/// client.discover().await;
/// let results = client.search(&SearchCriteria::new("developer")).await?;
/// println!("source: {}", results.provenance.as_str());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CareerSearchClient {
    http: Arc<HttpClient>,
    jobs: JobsClient,
    health: Arc<HealthCache>,
    resolver: Arc<EndpointResolver>,
    discovery: Arc<DiscoveryState>,
}

impl CareerSearchClient {
    /// Create a client with the given configuration.
    ///
    /// The search pipeline runs the direct API tier with retries and falls
    /// back to generated listings. Attach an agent with
    /// [`with_agent`](Self::with_agent) to add the agent tier in front.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid, for example an
    /// empty endpoint list or an endpoint that is not a URL.
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        Self::assemble(config, None)
    }

    /// Create a client whose searches try the agent before the direct API.
    ///
    /// The agent only participates while `agent_enabled` is set in the
    /// configuration, so an attached agent can be switched off without
    /// rebuilding the client setup.
    pub fn with_agent(config: ClientConfig, agent: Arc<dyn AgentSearch>) -> SdkResult<Self> {
        Self::assemble(config, Some(agent))
    }

    /// Create a new client using a builder pattern.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use career_search_sdk::CareerSearchClient;
    /// use std::time::Duration;
    ///
    /// let client = CareerSearchClient::builder()
    ///     .with_endpoints(["http://localhost:5000"])
    ///     .with_timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok::<(), career_search_sdk::SdkError>(())
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn assemble(config: ClientConfig, agent: Option<Arc<dyn AgentSearch>>) -> SdkResult<Self> {
        let probe_timeout = config.probe_timeout;
        let agent_enabled = config.agent_enabled;
        let default_location = config.default_location.clone();

        let http = Arc::new(HttpClient::new(config)?);
        let health = Arc::new(HealthCache::new());

        let mut strategies: Vec<Box<dyn SearchStrategy>> = Vec::new();
        if let Some(agent) = agent {
            if agent_enabled {
                strategies.push(Box::new(AgentStrategy::new(agent)));
            }
        }
        strategies.push(Box::new(DirectApiStrategy::new(
            Arc::clone(&http),
            Arc::clone(&health),
        )));

        let pipeline = Arc::new(SearchPipeline::new(
            strategies,
            Arc::clone(&health),
            default_location,
        ));

        Ok(Self {
            jobs: JobsClient::new(Arc::clone(&http), pipeline),
            resolver: Arc::new(EndpointResolver::new(probe_timeout)?),
            discovery: Arc::new(DiscoveryState::new()),
            http,
            health,
        })
    }

    /// Search for job listings.
    ///
    /// Criteria are validated before anything touches the network; the
    /// only error this method returns is a validation failure. Endpoint
    /// discovery runs first if it has not run yet, then the criteria go
    /// through the fallback pipeline, so a well-formed search always
    /// produces listings. Check [`SearchResult::provenance`] to see
    /// whether they are live.
    pub async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult> {
        criteria.ensure_valid()?;
        self.ensure_discovered().await;
        self.jobs.search(criteria).await
    }

    /// Check whether the backend is reachable and healthy.
    ///
    /// A cached verdict is reused unless `force` is set. Probe failures
    /// are cached as unhealthy; the method itself never fails.
    pub async fn check_health(&self, force: bool) -> bool {
        if !force && self.health.is_cached() {
            return self.health.get().is_healthy();
        }

        let probe_timeout = self.http.config().probe_timeout;
        let healthy = match self
            .http
            .get_with_timeout::<HealthResponse>("/", probe_timeout)
            .await
        {
            Ok(response) => response.is_healthy(),
            Err(err) => {
                debug!("Health probe failed: {}", err);
                false
            }
        };

        self.health.record(healthy);
        healthy
    }

    /// Probe the candidate endpoints and route requests to the first one
    /// that answers.
    ///
    /// Discovery runs at most once per client; later calls return the
    /// endpoint already in use. When no candidate answers, requests stay
    /// on the highest-priority candidate and `None` is returned.
    pub async fn discover(&self) -> Option<String> {
        if !self.discovery.begin() {
            return Some(self.http.base_url());
        }
        self.run_discovery().await
    }

    /// Discard the previous discovery outcome and probe the candidates
    /// again. Useful after a network change.
    pub async fn rediscover(&self) -> Option<String> {
        self.discovery.reset();
        self.discovery.begin();
        self.run_discovery().await
    }

    async fn ensure_discovered(&self) {
        if self.discovery.begin() {
            self.run_discovery().await;
        }
    }

    async fn run_discovery(&self) -> Option<String> {
        match self.resolver.resolve(&self.http.config().endpoints).await {
            Some(endpoint) => {
                info!("Routing requests to {}", endpoint);
                self.http.set_base_url(&endpoint);
                Some(endpoint)
            }
            None => {
                warn!("No endpoint answered; staying on {}", self.http.base_url());
                None
            }
        }
    }

    /// Get the jobs client for searches, details, and suggestions.
    pub fn jobs(&self) -> &JobsClient {
        &self.jobs
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// This is useful for making custom requests not covered by the
    /// resource clients.
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// The endpoint requests are currently routed to.
    pub fn base_url(&self) -> String {
        self.http.base_url()
    }

    /// The cached health verdict, without touching the network.
    pub fn cached_health(&self) -> HealthState {
        self.health.get()
    }
}

/// Builder for creating a [`CareerSearchClient`] with fluent configuration.
pub struct ClientBuilder {
    config_builder: ClientConfigBuilder,
    agent: Option<Arc<dyn AgentSearch>>,
}

impl ClientBuilder {
    /// Create a builder seeded with the default configuration.
    pub fn new() -> Self {
        Self {
            config_builder: ClientConfig::builder(),
            agent: None,
        }
    }

    /// Replace the candidate endpoint list.
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_builder = self.config_builder.endpoints(endpoints);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Set the timeout for endpoint and health probes.
    pub fn with_probe_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.probe_timeout(timeout);
        self
    }

    /// Set the maximum number of retries for the direct API tier.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config_builder = self.config_builder.max_retries(max_retries);
        self
    }

    /// Set the region used when a search omits a location.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.default_location(location);
        self
    }

    /// Attach an agent tier to run before the direct API.
    pub fn with_agent(mut self, agent: Arc<dyn AgentSearch>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Enable or disable the agent tier without detaching the agent.
    pub fn with_agent_enabled(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.agent_enabled(enabled);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error when the assembled configuration is invalid.
    pub fn build(self) -> SdkResult<CareerSearchClient> {
        CareerSearchClient::assemble(self.config_builder.build(), self.agent)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config_builder", &self.config_builder)
            .field("agent", &self.agent.as_ref().map(|_| "<attached>"))
            .finish()
    }
}
