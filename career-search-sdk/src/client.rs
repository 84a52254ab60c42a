//! HTTP client implementation
//!
//! Core request execution for the SDK: URL building against the active
//! endpoint, per-request timeouts, and structured error classification.
//! Requests go to whichever endpoint discovery last settled on.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};

/// The HTTP client for making API requests
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: Arc<ClientConfig>,
    base_url: RwLock<String>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(SdkError::Network)?;

        let base_url = RwLock::new(config.primary_endpoint().to_string());

        Ok(Self {
            client,
            config: Arc::new(config),
            base_url,
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The endpoint requests are currently routed to
    pub fn base_url(&self) -> String {
        let guard = self.base_url.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Route subsequent requests to a different endpoint. In-flight
    /// requests keep the endpoint they started with.
    pub(crate) fn set_base_url(&self, endpoint: impl Into<String>) {
        let mut guard = self.base_url.write().unwrap_or_else(|e| e.into_inner());
        *guard = endpoint.into();
    }

    /// Build the full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        let base_url = self.base_url();
        let base = base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.request::<T, ()>(path, None, self.config.timeout).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> SdkResult<T> {
        self.request(path, Some(query), self.config.timeout).await
    }

    /// Make a GET request with an explicit deadline
    pub async fn get_with_timeout<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> SdkResult<T> {
        self.request::<T, ()>(path, None, timeout).await
    }

    /// Execute one GET and classify the outcome
    async fn request<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: Option<&Q>,
        timeout: Duration,
    ) -> SdkResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url).timeout(timeout);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(SdkError::Timeout(timeout)),
            Err(e) => return Err(SdkError::Network(e)),
        };

        let status = response.status();
        let text = response.text().await.map_err(SdkError::Network)?;
        debug!("Response {} ({} bytes)", status, text.len());

        if status.is_success() {
            serde_json::from_str(&text).map_err(SdkError::from)
        } else {
            Err(SdkError::from_response(status.as_u16(), &text))
        }
    }
}
