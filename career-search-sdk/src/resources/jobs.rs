//! Job search resource
//!
//! Listing search, job details, and the static suggestion lists the app
//! shows before the user types. Searches are validated and normalized
//! here, then handed to the fallback pipeline; details degrade to a
//! friendly placeholder instead of failing.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use career_search_core::{JobListing, Provenance, SearchCriteria, SearchResult};

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};
use crate::fallback::SearchPipeline;

const SEARCH_SUGGESTIONS: [&str; 8] = [
    "Yazılım Geliştirici",
    "Frontend Developer",
    "Backend Developer",
    "Mobil Uygulama Geliştirici",
    "Data Scientist",
    "DevOps Engineer",
    "UI/UX Designer",
    "Proje Yöneticisi",
];

const LOCATION_SUGGESTIONS: [&str; 6] =
    ["İstanbul", "Ankara", "İzmir", "Bursa", "Antalya", "Uzaktan"];

/// Client for job search operations
#[derive(Debug, Clone)]
pub struct JobsClient {
    client: Arc<HttpClient>,
    pipeline: Arc<SearchPipeline>,
}

impl JobsClient {
    pub(crate) fn new(client: Arc<HttpClient>, pipeline: Arc<SearchPipeline>) -> Self {
        Self { client, pipeline }
    }

    /// Search for job listings.
    ///
    /// Criteria are validated before anything touches the network: a
    /// missing or blank query errors immediately. Valid criteria are
    /// normalized (trimmed query, default limit and location, blank
    /// filters dropped) and run through the fallback pipeline, so the
    /// call cannot fail for network reasons. Check
    /// [`SearchResult::provenance`] to see which tier answered.
    pub async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult> {
        criteria.ensure_valid()?;
        let normalized = criteria.normalized(&self.client.config().default_location);
        Ok(self.pipeline.run(&normalized).await)
    }

    /// Fetch the detail record for a single posting.
    ///
    /// The backend cannot always expand a posting URL; when the call
    /// fails for any reason other than a blank URL the client returns a
    /// degraded [`JobDetails`] that tells the user to open the posting
    /// directly.
    pub async fn details(&self, job_url: &str) -> SdkResult<JobDetails> {
        if job_url.trim().is_empty() {
            return Err(SdkError::Validation(
                "job URL must not be blank".to_string(),
            ));
        }

        let params = JobDetailsParams {
            url: job_url.to_string(),
            locale: self.client.config().locale.clone(),
        };

        match self
            .client
            .get_with_query::<JobDetails, _>("/api/jobs/details", &params)
            .await
        {
            Ok(details) => Ok(details),
            Err(err) => {
                warn!("Job details lookup failed: {}", err);
                Ok(JobDetails::degraded(job_url, &err))
            }
        }
    }

    /// Popular queries to offer before the user types anything.
    pub fn search_suggestions(&self) -> Vec<&'static str> {
        SEARCH_SUGGESTIONS.to_vec()
    }

    /// Common locations to offer alongside the search box.
    pub fn location_suggestions(&self) -> Vec<&'static str> {
        LOCATION_SUGGESTIONS.to_vec()
    }
}

/// Detail record for a single posting.
///
/// The backend answers with snake_case fields and may omit any of them,
/// so every field is optional. Degraded instances carry a message and a
/// suggestion instead of real detail data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobDetails {
    /// The posting this record describes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    /// Human-readable status of the lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// What the user should do next when the lookup was degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// The failure that degraded the lookup, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobDetails {
    fn degraded(job_url: &str, error: &SdkError) -> Self {
        Self {
            job_url: Some(job_url.to_string()),
            message: Some("Detailed listing data is currently unavailable.".to_string()),
            suggestion: Some(
                "Open the posting in a browser for the full description.".to_string(),
            ),
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct JobDetailsParams {
    url: String,
    locale: String,
}

/// Query parameters for the backend search endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct JobSearchParams {
    pub(crate) keywords: String,
    pub(crate) location: String,
    pub(crate) locale: String,
    pub(crate) sort: String,
    pub(crate) pagesize: u32,
    #[serde(rename = "contracttype", skip_serializing_if = "Option::is_none")]
    pub(crate) contract_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) company: Option<String>,
}

impl JobSearchParams {
    pub(crate) fn from_criteria(criteria: &SearchCriteria, config: &ClientConfig) -> Self {
        Self {
            keywords: criteria.query.clone(),
            location: criteria
                .location
                .clone()
                .unwrap_or_else(|| config.default_location.clone()),
            locale: config.locale.clone(),
            sort: config.sort.clone(),
            pagesize: criteria.effective_limit(),
            contract_type: criteria.job_type.clone(),
            experience_level: criteria.experience_level.clone(),
            company: criteria.company.clone(),
        }
    }
}

/// Wire shape of a search response.
///
/// Every field defaults so that sparse or partially malformed envelopes
/// still deserialize.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) jobs: Vec<RawJobListing>,
    #[serde(default, rename = "totalResults")]
    pub(crate) total_results: u64,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) provenance_tag: Option<String>,
}

impl SearchEnvelope {
    /// Turn a successful envelope into the domain result the app renders.
    pub(crate) fn into_result(self, criteria: &SearchCriteria) -> SearchResult {
        let provenance = self
            .provenance_tag
            .as_deref()
            .map(Provenance::parse)
            .unwrap_or_default();

        let jobs: Vec<JobListing> = self
            .jobs
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_listing(index))
            .collect();

        // Backends report the full match count separately from the page
        // of listings. A missing count means the page is everything.
        let total_results = if self.total_results > 0 {
            self.total_results
        } else {
            jobs.len() as u64
        };

        let mut result = SearchResult::new(jobs, criteria.clone(), provenance)
            .with_total_results(total_results);
        if let Some(message) = self.message {
            result = result.with_message(message);
        }
        result
    }
}

/// A listing as the backend sends it. Everything is optional on the wire;
/// [`into_listing`](Self::into_listing) fills placeholders so one sloppy
/// record never sinks a whole page of results.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawJobListing {
    #[serde(default)]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) company: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) requirements: Vec<String>,
    #[serde(default)]
    pub(crate) salary: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) employment_type: Option<String>,
    #[serde(default, rename = "postedDate")]
    pub(crate) posted_date: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
}

impl RawJobListing {
    pub(crate) fn into_listing(self, index: usize) -> JobListing {
        let posted_date = self
            .posted_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut listing = JobListing::new(
            self.id.unwrap_or_else(|| format!("job_{}", index + 1)),
            self.title.unwrap_or_else(|| "Untitled position".to_string()),
            self.company
                .unwrap_or_else(|| "Company not specified".to_string()),
            self.location
                .unwrap_or_else(|| "Location not specified".to_string()),
            self.employment_type
                .unwrap_or_else(|| "Tam Zamanlı".to_string()),
            posted_date,
        )
        .with_requirements(self.requirements);

        if let Some(description) = self.description {
            listing = listing.with_description(description);
        }
        if let Some(salary) = self.salary {
            listing = listing.with_salary(salary);
        }
        if let Some(url) = self.url {
            listing = listing.with_url(url);
        }
        listing
    }
}
