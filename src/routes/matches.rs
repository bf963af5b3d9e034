use actix_web::{web, HttpResponse, Responder};

use super::{parse_domain, AppState};
use crate::core::{
    Applications, Domain, DomainKind, Exams, FormError, Government, Jobs, Scholarships,
};
use crate::models::{
    Catalog, CatalogSummary, DomainInfo, ErrorResponse, FindMatchesRequest, FindMatchesResponse,
    FormData, HealthResponse,
};

/// Configure all catalog and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/domains", web::get().to(list_domains))
        .route("/catalog", web::get().to(catalog_summary))
        .route("/{domain}/entries", web::get().to(list_entries))
        .route("/{domain}/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Required fields and storage keys for every domain
async fn list_domains() -> impl Responder {
    let domains: Vec<DomainInfo> = DomainKind::ALL
        .into_iter()
        .map(|kind| DomainInfo {
            domain: kind.to_string(),
            catalog_key: kind.catalog_key().to_string(),
            draft_key: kind.draft_key(),
            required_fields: kind.required_fields().iter().map(|f| f.to_string()).collect(),
        })
        .collect();

    HttpResponse::Ok().json(domains)
}

/// Entry counts per domain
///
/// GET /api/v1/catalog
async fn catalog_summary(state: web::Data<AppState>) -> impl Responder {
    let catalog = match load_catalog(&state).await {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(CatalogSummary {
        scholarships: catalog.scholarships.len(),
        government: catalog.government.len(),
        exams: catalog.exams.len(),
        jobs: catalog.jobs.len(),
        applications: catalog.applications.len(),
        total: catalog.total_entries(),
    })
}

/// The whole collection of one domain, unfiltered
///
/// GET /api/v1/{domain}/entries
async fn list_entries(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let domain = match parse_domain(&path) {
        Ok(domain) => domain,
        Err(response) => return response,
    };

    let catalog = match load_catalog(&state).await {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    match domain {
        DomainKind::Scholarships => HttpResponse::Ok().json(&catalog.scholarships),
        DomainKind::Government => HttpResponse::Ok().json(&catalog.government),
        DomainKind::Exams => HttpResponse::Ok().json(&catalog.exams),
        DomainKind::Jobs => HttpResponse::Ok().json(&catalog.jobs),
        DomainKind::Applications => HttpResponse::Ok().json(&catalog.applications),
    }
}

/// Find matching opportunities
///
/// POST /api/v1/{domain}/find
///
/// Request body:
/// ```json
/// {
///   "fields": { "age": "20", "state": "up", "income": "50000-100000" }
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    let domain = match parse_domain(&path) {
        Ok(domain) => domain,
        Err(response) => return response,
    };

    match domain {
        DomainKind::Scholarships => run_find::<Scholarships>(&state, &req.fields).await,
        DomainKind::Government => run_find::<Government>(&state, &req.fields).await,
        DomainKind::Exams => run_find::<Exams>(&state, &req.fields).await,
        DomainKind::Jobs => run_find::<Jobs>(&state, &req.fields).await,
        DomainKind::Applications => run_find::<Applications>(&state, &req.fields).await,
    }
}

async fn run_find<D: Domain>(state: &AppState, form: &FormData) -> HttpResponse {
    let profile = match D::profile(form) {
        Ok(profile) => profile,
        Err(FormError::MissingFields(fields)) => {
            tracing::info!("Rejected {} submission, missing: {:?}", D::KIND, fields);
            return HttpResponse::BadRequest().json(
                ErrorResponse::new(
                    "Validation failed",
                    "This field is required",
                    400,
                )
                .with_fields(fields),
            );
        }
    };

    tracing::debug!("Normalized {} profile: {:?}", D::KIND, profile);

    let catalog = match load_catalog(state).await {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let result = state
        .matcher
        .find_matches::<D>(&profile, D::entries(&catalog));

    // The submission went through: drop the draft and remember what was sent
    if let Err(e) = state.autosave.discard(D::KIND).await {
        tracing::warn!("Failed to clear {} draft: {}", D::KIND, e);
    }
    if let Err(e) = state.autosave.drafts().record_submission(D::KIND, form) {
        tracing::warn!("Failed to record {} submission: {}", D::KIND, e);
    }

    tracing::info!(
        "Returning {} {} match(es) from {} candidates",
        result.total_results(),
        D::KIND,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        domain: D::KIND.to_string(),
        profile,
        total_results: result.total_results(),
        total_candidates: result.total_candidates,
        matches: result.matches,
    })
}

async fn load_catalog(state: &AppState) -> Result<Catalog, HttpResponse> {
    state.catalog.load().await.map_err(|e| {
        tracing::error!("Error fetching catalog from {}: {}", state.catalog.source(), e);
        HttpResponse::BadGateway().json(ErrorResponse::new(
            "Failed to load catalog",
            e.to_string(),
            502,
        ))
    })
}

