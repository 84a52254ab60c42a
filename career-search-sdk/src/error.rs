//! SDK error types and handling
//!
//! Failures are classified so the retry and fallback layers can decide
//! what to do with them: transient transport problems and server errors
//! are retryable, everything else is terminal for its tier.

use std::time::Duration;

use career_search_core::CoreError;
use thiserror::Error;

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// Connection could not be established or broke mid-request
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request exceeded its deadline; the in-flight request is cancelled
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code of the response
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Backend answered 200 but flagged the search as failed in the envelope
    #[error("API error: {message}")]
    Api {
        /// Message the backend attached to the failure
        message: String,
    },

    /// Response body did not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Search criteria were rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An endpoint candidate could not be parsed as a URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Error payload the backend attaches to non-success responses
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SdkError {
    /// Build an `Http` error from a response, preferring the JSON error
    /// fields when the body carries them.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message.or(parsed.error))
            .unwrap_or_else(|| truncate_body(body));

        SdkError::Http { status, message }
    }

    /// Check if the error is worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Network(_) | SdkError::Timeout(_) => true,
            SdkError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get the HTTP status code if available
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Http { status, .. } => Some(*status),
            SdkError::Network(err) => err.status().map(|code| code.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::MalformedResponse(err.to_string())
    }
}

impl From<CoreError> for SdkError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => SdkError::Validation(message),
            CoreError::Serialization(message) => SdkError::MalformedResponse(message),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;

    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        trimmed.to_string()
    } else {
        let prefix: String = trimmed.chars().take(MAX_CHARS).collect();
        format!("{}...", prefix.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_json_response() {
        let body = r#"{"error": "search_failed", "message": "Arama servisi kullanılamıyor"}"#;
        let error = SdkError::from_response(502, body);

        match error {
            SdkError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Arama servisi kullanılamıyor");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_from_plain_text_response() {
        let error = SdkError::from_response(500, "Internal Server Error");

        match error {
            SdkError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let error = SdkError::from_response(500, &body);

        match error {
            SdkError::Http { message, .. } => {
                assert!(message.len() < 220);
                assert!(message.ends_with("..."));
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(SdkError::Timeout(Duration::from_secs(10)).is_retryable());
        assert!(SdkError::Http {
            status: 500,
            message: "boom".to_string()
        }
        .is_retryable());
        assert!(SdkError::Http {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_retryable());

        assert!(!SdkError::Http {
            status: 400,
            message: "bad request".to_string()
        }
        .is_retryable());
        assert!(!SdkError::Http {
            status: 404,
            message: "not found".to_string()
        }
        .is_retryable());
        assert!(!SdkError::Api {
            message: "search failed".to_string()
        }
        .is_retryable());
        assert!(!SdkError::Validation("empty query".to_string()).is_retryable());
        assert!(!SdkError::Configuration("no endpoints".to_string()).is_retryable());
    }

    #[test]
    fn test_error_status() {
        let http = SdkError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(http.status(), Some(404));

        assert_eq!(SdkError::Validation("bad".to_string()).status(), None);
        assert_eq!(SdkError::Timeout(Duration::from_secs(1)).status(), None);
    }

    #[test]
    fn test_validation_error_converts_from_core() {
        let error: SdkError = CoreError::Validation("query must not be blank".to_string()).into();
        assert!(matches!(error, SdkError::Validation(_)));
    }
}
