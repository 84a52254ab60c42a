//! SDK configuration
//!
//! Configuration for the client: candidate endpoints, timeouts, retry
//! budget, and the search defaults the backend expects. Values come from
//! code, from `config/career-search.toml`, or from `CAREER_SEARCH_*`
//! environment variables.

use std::time::Duration;

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

use crate::error::{SdkError, SdkResult};

/// Candidate base URLs probed in order when none are configured.
///
/// The order mirrors the environments the app runs in: the Android
/// emulator's host alias first, then the development LAN host, then
/// localhost.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "http://10.0.2.2:5000",
    "http://192.168.59.150:5000",
    "http://localhost:5000",
];

/// Configuration for the SDK client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Ordered candidate base URLs, highest priority first
    pub endpoints: Vec<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Timeout for a single endpoint or health probe
    pub probe_timeout: Duration,

    /// Maximum number of retries for the direct API tier
    pub max_retries: u32,

    /// Whether an attached agent participates in searches
    pub agent_enabled: bool,

    /// Locale sent with every search
    pub locale: String,

    /// Sort order requested from the backend
    pub sort: String,

    /// Region substituted when the caller omits a location
    pub default_location: String,

    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(3),
            max_retries: 2,
            agent_enabled: true,
            locale: "tr_TR".to_string(),
            sort: "relevance".to_string(),
            default_location: "Türkiye".to_string(),
            user_agent: format!("career-search-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with a single known endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoints: vec![endpoint.into()],
            ..Default::default()
        }
    }

    /// Create a new builder seeded with the defaults
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from `config/career-search.toml` (optional) and
    /// `CAREER_SEARCH_*` environment variables. Environment values win;
    /// anything not set falls back to the defaults.
    ///
    /// `CAREER_SEARCH_ENDPOINTS` takes a comma-separated list.
    pub fn load() -> SdkResult<Self> {
        let loaded = ConfigLoader::builder()
            .add_source(File::with_name("config/career-search").required(false))
            .add_source(
                Environment::with_prefix("CAREER_SEARCH")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("endpoints"),
            )
            .build()
            .map_err(|e| SdkError::Configuration(e.to_string()))?;

        let raw: RawSettings = loaded
            .try_deserialize()
            .map_err(|e| SdkError::Configuration(e.to_string()))?;

        let config = Self::from(raw);
        config.validate()?;
        Ok(config)
    }

    /// Replace the candidate endpoint list
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the endpoint probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enable or disable the agent tier
    pub fn with_agent_enabled(mut self, enabled: bool) -> Self {
        self.agent_enabled = enabled;
        self
    }

    /// Set the locale sent with every search
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the sort order requested from the backend
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Set the region used when the caller omits a location
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Highest-priority candidate; requests go here until discovery picks
    /// a different endpoint
    pub fn primary_endpoint(&self) -> &str {
        self.endpoints.first().map(String::as_str).unwrap_or("")
    }

    /// Validate the configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.endpoints.is_empty() {
            return Err(SdkError::Configuration(
                "At least one endpoint is required".to_string(),
            ));
        }

        for endpoint in &self.endpoints {
            url::Url::parse(endpoint)?;
        }

        if self.timeout.is_zero() {
            return Err(SdkError::Configuration(
                "Timeout cannot be zero".to_string(),
            ));
        }

        if self.probe_timeout.is_zero() {
            return Err(SdkError::Configuration(
                "Probe timeout cannot be zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings as they appear in files and the environment
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    endpoints: Option<Vec<String>>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    probe_timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    agent_enabled: Option<bool>,
    locale: Option<String>,
    sort: Option<String>,
    default_location: Option<String>,
}

impl From<RawSettings> for ClientConfig {
    fn from(raw: RawSettings) -> Self {
        let mut config = ClientConfig::default();
        if let Some(endpoints) = raw.endpoints {
            config.endpoints = endpoints;
        }
        if let Some(secs) = raw.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = raw.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = raw.probe_timeout_secs {
            config.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(max_retries) = raw.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(agent_enabled) = raw.agent_enabled {
            config.agent_enabled = agent_enabled;
        }
        if let Some(locale) = raw.locale {
            config.locale = locale;
        }
        if let Some(sort) = raw.sort {
            config.sort = sort;
        }
        if let Some(default_location) = raw.default_location {
            config.default_location = default_location;
        }
        config
    }
}

/// Builder for SDK configuration
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate endpoint list
    pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_endpoints(endpoints);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the endpoint probe timeout
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Enable or disable the agent tier
    pub fn agent_enabled(mut self, enabled: bool) -> Self {
        self.config.agent_enabled = enabled;
        self
    }

    /// Set the locale sent with every search
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.config.locale = locale.into();
        self
    }

    /// Set the region used when the caller omits a location
    pub fn default_location(mut self, location: impl Into<String>) -> Self {
        self.config.default_location = location.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
