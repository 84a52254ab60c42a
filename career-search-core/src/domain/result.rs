use serde::{Deserialize, Serialize};

use crate::domain::criteria::SearchCriteria;
use crate::domain::listing::JobListing;

/// Which tier of the fallback chain produced a result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Live data from the backend search endpoint
    #[default]
    Real,
    /// Served by the agent collaborator
    Agent,
    /// Generated locally after every live tier failed
    EnhancedMock,
    /// Canned static listings
    Mock,
    /// Substitute data a live source served in place of real listings
    Fallback,
}

impl Provenance {
    /// Map a server-supplied tag onto the enum. The legacy backend labels
    /// its canned responses `demo`; those are server-served substitutes, so
    /// they land on `Fallback` rather than the client-side mock tags.
    /// Unknown tags are treated as live data.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "real" => Provenance::Real,
            "agent" => Provenance::Agent,
            "enhanced_mock" => Provenance::EnhancedMock,
            "mock" => Provenance::Mock,
            "demo" | "fallback" => Provenance::Fallback,
            _ => Provenance::Real,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Real => "real",
            Provenance::Agent => "agent",
            Provenance::EnhancedMock => "enhanced_mock",
            Provenance::Mock => "mock",
            Provenance::Fallback => "fallback",
        }
    }

    /// True when the data came from a live source rather than a substitute.
    pub fn is_live(&self) -> bool {
        matches!(self, Provenance::Real | Provenance::Agent)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub success: bool,
    #[serde(default)]
    pub jobs: Vec<JobListing>,
    #[serde(default)]
    pub total_results: u64,
    pub search_criteria: SearchCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub provenance: Provenance,
}

impl SearchResult {
    pub fn new(jobs: Vec<JobListing>, criteria: SearchCriteria, provenance: Provenance) -> Self {
        let total_results = jobs.len() as u64;
        Self {
            success: true,
            jobs,
            total_results,
            search_criteria: criteria,
            message: None,
            provenance,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Backends report the full match count, which may exceed the page of
    /// listings actually returned.
    pub fn with_total_results(mut self, total_results: u64) -> Self {
        self.total_results = total_results;
        self
    }

    /// True when the listings are substitutes rather than live data.
    pub fn is_degraded(&self) -> bool {
        !self.provenance.is_live()
    }
}
