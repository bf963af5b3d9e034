// Route exports
pub mod account;
pub mod drafts;
pub mod matches;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{DomainKind, Matcher};
use crate::models::ErrorResponse;
use crate::services::{Autosave, CatalogStore, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub autosave: Arc<Autosave>,
    pub sessions: SessionStore,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(drafts::configure)
            .configure(account::configure)
            .configure(matches::configure),
    );
}

/// Resolve a `{domain}` path segment or build the 404 response
pub(crate) fn parse_domain(raw: &str) -> Result<DomainKind, HttpResponse> {
    raw.parse::<DomainKind>().map_err(|e| {
        HttpResponse::NotFound().json(ErrorResponse::new(
            "Unknown domain",
            format!(
                "{}; expected one of: scholarships, government, exams, jobs, applications",
                e
            ),
            404,
        ))
    })
}
