use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, Result};

/// Listing count requested when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[validate(range(min = 1, message = "limit must be positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: None,
            company: None,
            job_type: None,
            experience_level: None,
            limit: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    pub fn with_experience_level(mut self, experience_level: impl Into<String>) -> Self {
        self.experience_level = Some(experience_level.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject criteria that cannot be dispatched. A query that is present
    /// but all whitespace counts as missing.
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate()?;
        if self.query.trim().is_empty() {
            return Err(CoreError::Validation(
                "query must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy with the defaults applied: trimmed query, `DEFAULT_LIMIT` when no
    /// limit was given, `default_location` when no usable location was given.
    /// Blank optional filters are dropped rather than sent as empty strings.
    pub fn normalized(&self, default_location: &str) -> Self {
        Self {
            query: self.query.trim().to_string(),
            location: non_blank(&self.location)
                .or_else(|| Some(default_location.to_string())),
            company: non_blank(&self.company),
            job_type: non_blank(&self.job_type),
            experience_level: non_blank(&self.experience_level),
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
        }
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
