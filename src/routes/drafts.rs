use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::{parse_domain, AppState};
use crate::models::{DraftResponse, ErrorResponse, SaveDraftRequest};
use crate::services::StoreError;

/// Configure draft routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/drafts/{domain}")
            .route(web::get().to(get_draft))
            .route(web::put().to(save_draft))
            .route(web::delete().to(delete_draft)),
    )
    .route("/drafts/{domain}/flush", web::post().to(flush_draft));
}

/// Restore the stored draft
///
/// GET /api/v1/drafts/{domain}
async fn get_draft(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let domain = match parse_domain(&path) {
        Ok(domain) => domain,
        Err(response) => return response,
    };

    match state.autosave.drafts().load(domain) {
        Ok(draft) => {
            let fields = draft.unwrap_or_default();
            HttpResponse::Ok().json(DraftResponse {
                domain: domain.to_string(),
                progress: fields.progress(domain.required_fields()),
                fields,
            })
        }
        Err(e) => store_failure(e),
    }
}

/// Stage a snapshot for the next auto-save tick, or write it now
///
/// PUT /api/v1/drafts/{domain}
async fn save_draft(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SaveDraftRequest>,
) -> impl Responder {
    let domain = match parse_domain(&path) {
        Ok(domain) => domain,
        Err(response) => return response,
    };

    let SaveDraftRequest { fields, immediate } = req.into_inner();
    let progress = fields.progress(domain.required_fields());

    if immediate {
        if let Err(e) = state.autosave.drafts().save(domain, &fields) {
            return store_failure(e);
        }
    } else {
        state.autosave.stage(domain, fields).await;
    }

    HttpResponse::Accepted().json(json!({
        "domain": domain.to_string(),
        "saved": immediate,
        "progress": progress,
    }))
}

/// Write the staged snapshot now; used when the visitor leaves the page
///
/// POST /api/v1/drafts/{domain}/flush
async fn flush_draft(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let domain = match parse_domain(&path) {
        Ok(domain) => domain,
        Err(response) => return response,
    };

    match state.autosave.flush(domain).await {
        Ok(flushed) => HttpResponse::Ok().json(json!({
            "domain": domain.to_string(),
            "flushed": flushed,
        })),
        Err(e) => store_failure(e),
    }
}

/// DELETE /api/v1/drafts/{domain}
async fn delete_draft(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let domain = match parse_domain(&path) {
        Ok(domain) => domain,
        Err(response) => return response,
    };

    match state.autosave.discard(domain).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_failure(e),
    }
}

fn store_failure(e: StoreError) -> HttpResponse {
    tracing::error!("Draft store error: {}", e);
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "Draft storage failed",
        e.to_string(),
        500,
    ))
}
