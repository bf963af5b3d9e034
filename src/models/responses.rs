use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use super::profile::FormData;

/// Response for the find endpoint: the matched entries in catalog order plus counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "E: Serialize, P: Serialize",
    deserialize = "E: serde::de::DeserializeOwned + Default, P: Deserialize<'de>"
))]
pub struct FindMatchesResponse<E, P> {
    pub domain: String,
    pub profile: P,
    pub matches: Vec<CatalogEntry<E>>,
    pub total_results: usize,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }
}

/// Per-domain description for clients building forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainInfo {
    pub domain: String,
    pub catalog_key: String,
    pub draft_key: String,
    pub required_fields: Vec<String>,
}

/// Entry counts per domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub scholarships: usize,
    pub government: usize,
    pub exams: usize,
    pub jobs: usize,
    pub applications: usize,
    pub total: usize,
}

/// Stored draft for a domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResponse {
    pub domain: String,
    pub fields: FormData,
    pub progress: u8,
}
