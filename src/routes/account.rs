use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use super::AppState;
use crate::models::{ErrorResponse, LoginRequest, SaveOpportunityRequest, SignupRequest};
use crate::services::SessionError;

/// Configure demo account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/account")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me))
            .route("/saved", web::get().to(list_saved))
            .route("/saved", web::post().to(save_opportunity)),
    );
}

/// POST /api/v1/account/signup
async fn signup(state: web::Data<AppState>, req: web::Json<SignupRequest>) -> impl Responder {
    if let Err(e) = req.validate() {
        return validation_failure(e);
    }

    match state
        .sessions
        .signup(&req.name, &req.email, &req.password, req.notifications)
    {
        Ok(user) => HttpResponse::Created().json(user),
        Err(e) => session_failure(e),
    }
}

/// POST /api/v1/account/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(e) = req.validate() {
        return validation_failure(e);
    }

    match state.sessions.login(&req.email, &req.password) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => session_failure(e),
    }
}

async fn logout(state: web::Data<AppState>) -> impl Responder {
    match state.sessions.logout() {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => session_failure(e),
    }
}

/// The signed-in user with the greeting name, or `null` user when signed out
///
/// GET /api/v1/account/me
async fn me(state: web::Data<AppState>) -> impl Responder {
    match state.sessions.current() {
        Ok(Some(user)) => HttpResponse::Ok().json(json!({
            "displayName": user.display_name(),
            "user": user,
        })),
        Ok(None) => HttpResponse::Ok().json(json!({ "user": null })),
        Err(e) => session_failure(e),
    }
}

async fn list_saved(state: web::Data<AppState>) -> impl Responder {
    match state.sessions.saved() {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => session_failure(e),
    }
}

/// POST /api/v1/account/saved
async fn save_opportunity(
    state: web::Data<AppState>,
    req: web::Json<SaveOpportunityRequest>,
) -> impl Responder {
    if let Err(e) = req.validate() {
        return validation_failure(e);
    }

    let item = match serde_json::to_value(req.into_inner()) {
        Ok(item) => item,
        Err(e) => {
            tracing::error!("Failed to encode saved opportunity: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Internal error",
                e.to_string(),
                500,
            ));
        }
    };

    match state.sessions.save_opportunity(item) {
        Ok(true) => HttpResponse::Created().json(json!({ "saved": true })),
        Ok(false) => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "Not signed in",
            "Sign in to save opportunities",
            401,
        )),
        Err(e) => session_failure(e),
    }
}

fn validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    HttpResponse::BadRequest().json(
        ErrorResponse::new("Validation failed", errors.to_string(), 400).with_fields(fields),
    )
}

fn session_failure(e: SessionError) -> HttpResponse {
    match e {
        SessionError::PasswordTooShort => HttpResponse::BadRequest().json(
            ErrorResponse::new("Validation failed", e.to_string(), 400)
                .with_fields(vec!["password".to_string()]),
        ),
        SessionError::EmailTaken => {
            HttpResponse::Conflict().json(ErrorResponse::new("Conflict", e.to_string(), 409))
        }
        SessionError::InvalidCredentials => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("Unauthorized", e.to_string(), 401))
        }
        SessionError::Store(ref inner) => {
            tracing::error!("Session store error: {}", inner);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Internal error",
                e.to_string(),
                500,
            ))
        }
    }
}
