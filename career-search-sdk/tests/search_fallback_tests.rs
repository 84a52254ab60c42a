//! End-to-end behavior of the tiered search: live results, retry-then-
//! degrade, the agent tier, health caching, and the promise that a
//! well-formed search always produces listings.

use std::sync::Arc;
use std::time::Duration;

use mockall::mock;
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use career_search_sdk::{
    AgentSearch, CareerSearchClient, ClientConfig, HealthState, JobListing, Provenance, SdkError,
    SdkResult, SearchCriteria, SearchResult,
};

mock! {
    Agent {}

    #[async_trait::async_trait]
    impl AgentSearch for Agent {
        async fn search(&self, criteria: &SearchCriteria) -> SdkResult<SearchResult>;
    }
}

fn criteria() -> SearchCriteria {
    SearchCriteria::new("React Developer")
        .with_location("İstanbul")
        .with_limit(3)
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri())
        .with_timeout(Duration::from_secs(2))
        .with_probe_timeout(Duration::from_millis(500))
        .with_max_retries(1)
}

/// Lets discovery and health probes succeed without an expectation count,
/// so counted expectations can sit on the search path alone.
async fn mount_healthy_root(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(server)
        .await;
}

fn search_envelope() -> serde_json::Value {
    json!({
        "success": true,
        "jobs": [
            {
                "id": "1",
                "title": "React Developer",
                "company": "TechCorp Yazılım",
                "location": "İstanbul",
                "type": "Tam Zamanlı",
                "postedDate": "2025-01-10",
                "requirements": ["React", "TypeScript"]
            },
            {
                "id": "2",
                "title": "Frontend Developer",
                "company": "Dijital Çözümler A.Ş.",
                "location": "İstanbul",
                "type": "Uzaktan",
                "postedDate": "2025-01-12"
            }
        ],
        "totalResults": 120,
        "message": "120 sonuç bulundu"
    })
}

fn agent_listing() -> JobListing {
    JobListing::new(
        "agent_1",
        "React Developer",
        "İnovasyon Labs",
        "İstanbul",
        "Uzaktan",
        chrono::NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
    )
}

// ===== Direct API tier =====

#[tokio::test]
async fn test_direct_search_returns_live_results() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .and(query_param("keywords", "React Developer"))
        .and(query_param("location", "İstanbul"))
        .and(query_param("pagesize", "3"))
        .and(query_param("locale", "tr_TR"))
        .and(query_param("sort", "relevance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert!(results.success);
    assert_eq!(results.provenance, Provenance::Real);
    assert!(!results.is_degraded());
    assert_eq!(results.jobs.len(), 2);
    assert_eq!(results.total_results, 120);
    assert_eq!(results.jobs[0].title, "React Developer");
    assert_eq!(results.jobs[0].requirements, vec!["React", "TypeScript"]);
    assert_eq!(results.message.as_deref(), Some("120 sonuç bulundu"));
    assert_eq!(client.cached_health(), HealthState::Healthy);
}

#[tokio::test]
async fn test_server_errors_are_retried_then_degrade() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    // max_retries is 1, so the 500 should be hit exactly twice
    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert!(results.success);
    assert_eq!(results.provenance, Provenance::EnhancedMock);
    assert!(results.is_degraded());
    assert_eq!(results.jobs.len(), 3);
    assert!(results.jobs.iter().all(|job| job.location == "İstanbul"));
    assert!(results.message.as_deref().unwrap().contains("HTTP 500"));
    assert_eq!(client.cached_health(), HealthState::Unhealthy);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Unsupported filter"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert_eq!(results.provenance, Provenance::EnhancedMock);
    let message = results.message.as_deref().unwrap();
    assert!(message.contains("HTTP 400"));
    assert!(message.contains("Unsupported filter"));
}

#[tokio::test]
async fn test_unreachable_backend_degrades_to_generated_listings() {
    let config = ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(Duration::from_millis(500))
        .with_probe_timeout(Duration::from_millis(200))
        .with_max_retries(0);

    let client = CareerSearchClient::new(config).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert!(results.success);
    assert_eq!(results.provenance, Provenance::EnhancedMock);
    assert_eq!(results.jobs.len(), 3);
    assert!(results.jobs.iter().all(|job| !job.requirements.is_empty()));
    assert_eq!(client.cached_health(), HealthState::Unhealthy);
}

#[tokio::test]
async fn test_backend_rejection_envelope_degrades() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    // A well-formed "no" from the backend is not retried
    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Arama servisi şu anda kullanılamıyor"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert_eq!(results.provenance, Provenance::EnhancedMock);
    assert!(results
        .message
        .as_deref()
        .unwrap()
        .contains("Arama servisi şu anda kullanılamıyor"));
}

#[tokio::test]
async fn test_demo_responses_surface_as_fallback() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "jobs": [{
                "id": "demo_1",
                "title": "Demo Listing",
                "company": "TechCorp Yazılım",
                "location": "İstanbul",
                "type": "Tam Zamanlı",
                "postedDate": "2025-01-10"
            }],
            "type": "demo"
        })))
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert_eq!(results.provenance, Provenance::Fallback);
    assert!(results.is_degraded());
    assert_eq!(results.jobs.len(), 1);
    assert_eq!(results.total_results, 1);
}

#[tokio::test]
async fn test_defaults_fill_the_query() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .and(query_param("keywords", "developer"))
        .and(query_param("pagesize", "10"))
        .and(query_param("location", "Türkiye"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let results = client
        .search(&SearchCriteria::new("developer"))
        .await
        .unwrap();

    assert_eq!(results.provenance, Provenance::Real);
}

// ===== Validation =====

#[tokio::test]
async fn test_blank_queries_never_touch_the_network() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let err = client
        .search(&SearchCriteria::new("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
}

// ===== Health cache =====

#[tokio::test]
async fn test_cached_health_is_reused() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();

    assert!(client.check_health(false).await);
    assert!(client.check_health(false).await);
    assert!(client.check_health(false).await);
    assert_eq!(client.cached_health(), HealthState::Healthy);
}

#[tokio::test]
async fn test_forced_check_bypasses_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();

    assert!(client.check_health(false).await);
    assert!(client.check_health(true).await);
    assert!(client.check_health(false).await);
}

#[tokio::test]
async fn test_failed_probes_are_cached_as_unhealthy() {
    let config = ClientConfig::new("http://127.0.0.1:9")
        .with_probe_timeout(Duration::from_millis(200));

    let client = CareerSearchClient::new(config).unwrap();

    assert!(!client.check_health(false).await);
    assert_eq!(client.cached_health(), HealthState::Unhealthy);
    // answered from the cache, no second connection attempt
    assert!(!client.check_health(false).await);
}

#[tokio::test]
async fn test_unhealthy_status_body_reports_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "degraded"})),
        )
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();

    assert!(!client.check_health(false).await);
    assert_eq!(client.cached_health(), HealthState::Unhealthy);
}

// ===== Agent tier =====

#[tokio::test]
async fn test_agent_tier_short_circuits_the_api() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_envelope()))
        .expect(0)
        .mount(&server)
        .await;

    let mut agent = MockAgent::new();
    agent.expect_search().times(1).returning(|criteria| {
        Ok(SearchResult::new(
            vec![agent_listing()],
            criteria.clone(),
            Provenance::Real,
        ))
    });

    let client = CareerSearchClient::with_agent(config_for(&server), Arc::new(agent)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    // provenance is normalized to the tier that answered
    assert_eq!(results.provenance, Provenance::Agent);
    assert_eq!(results.jobs.len(), 1);
    assert_eq!(results.jobs[0].company, "İnovasyon Labs");
}

#[tokio::test]
async fn test_empty_agent_results_fall_through_to_the_api() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let mut agent = MockAgent::new();
    agent.expect_search().times(1).returning(|criteria| {
        Ok(SearchResult::new(
            Vec::new(),
            criteria.clone(),
            Provenance::Agent,
        ))
    });

    let client = CareerSearchClient::with_agent(config_for(&server), Arc::new(agent)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert_eq!(results.provenance, Provenance::Real);
    assert_eq!(results.jobs.len(), 2);
}

#[tokio::test]
async fn test_agent_errors_fall_through_to_the_api() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let mut agent = MockAgent::new();
    agent.expect_search().times(1).returning(|_| {
        Err(SdkError::Api {
            message: "assistant unavailable".to_string(),
        })
    });

    let client = CareerSearchClient::with_agent(config_for(&server), Arc::new(agent)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert_eq!(results.provenance, Provenance::Real);
}

#[tokio::test]
async fn test_disabled_agent_never_runs() {
    let server = MockServer::start().await;
    mount_healthy_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let mut agent = MockAgent::new();
    agent.expect_search().times(0);

    let config = config_for(&server).with_agent_enabled(false);
    let client = CareerSearchClient::with_agent(config, Arc::new(agent)).unwrap();
    let results = client.search(&criteria()).await.unwrap();

    assert_eq!(results.provenance, Provenance::Real);
}

// ===== Job details =====

#[tokio::test]
async fn test_details_surface_the_server_record() {
    let server = MockServer::start().await;

    // the backend's real reply shape: snake_case, no job payload yet
    Mock::given(method("GET"))
        .and(path("/api/jobs/details"))
        .and(query_param("url", "https://example.com/jobs/42"))
        .and(query_param("locale", "tr_TR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_url": "https://example.com/jobs/42",
            "message": "Job details retrieval would require additional implementation",
            "suggestion": "Use the search_jobs function to get job listings with basic details"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let details = client
        .jobs()
        .details("https://example.com/jobs/42")
        .await
        .unwrap();

    assert_eq!(details.job_url.as_deref(), Some("https://example.com/jobs/42"));
    assert_eq!(
        details.message.as_deref(),
        Some("Job details retrieval would require additional implementation")
    );
    assert!(details.suggestion.is_some());
    assert!(details.error.is_none());
}

#[tokio::test]
async fn test_details_degrade_instead_of_failing() {
    let server = MockServer::start().await;

    // Single expectation: the details path does not retry.
    Mock::given(method("GET"))
        .and(path("/api/jobs/details"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"success": false, "message": "Detay servisi kapalı"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let details = client
        .jobs()
        .details("https://example.com/jobs/42")
        .await
        .unwrap();

    assert_eq!(details.job_url.as_deref(), Some("https://example.com/jobs/42"));
    assert_eq!(
        details.message.as_deref(),
        Some("Detailed listing data is currently unavailable.")
    );
    assert!(details.suggestion.is_some());
    let error = details.error.unwrap();
    assert!(error.contains("500"), "unexpected error text: {error}");
}

#[tokio::test]
async fn test_blank_details_url_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = CareerSearchClient::new(config_for(&server)).unwrap();
    let err = client.jobs().details("   ").await.unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)));
}
