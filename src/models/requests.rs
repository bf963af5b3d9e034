use serde::{Deserialize, Serialize};
use validator::Validate;

use super::profile::FormData;

/// Request to find matching opportunities for one domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesRequest {
    #[serde(default)]
    pub fields: FormData,
}

/// Request to store a draft snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDraftRequest {
    #[serde(default)]
    pub fields: FormData,
    /// Write straight to the store instead of waiting for the next auto-save tick.
    #[serde(default)]
    pub immediate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub notifications: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to bookmark an opportunity for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveOpportunityRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
