// HTTP API tests

use actix_web::{http::StatusCode, test, web, App};
use opportunity_finder::core::{DomainKind, Matcher};
use opportunity_finder::routes::{configure_routes, AppState};
use opportunity_finder::services::{
    Autosave, CatalogStore, DraftStore, KeyValueStore, MemoryStore, SessionStore,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

fn write_catalog(name: &str) -> PathBuf {
    let catalog = json!({
        "scholarships": [
            {
                "name": "Open Merit Award",
                "provider": "Education Board",
                "eligibility": {
                    "minAge": 18,
                    "maxAge": 25,
                    "categories": ["general"],
                    "states": ["all"],
                    "economicStatus": ["bpl"]
                }
            },
            {
                "name": "SC Hostel Grant",
                "eligibility": { "categories": ["sc"] }
            }
        ],
        "jobs": [
            {
                "name": "Support Engineer",
                "jobType": "onsite",
                "eligibility": { "qualifications": ["graduate"], "minExperience": 0 }
            }
        ]
    });

    let path = std::env::temp_dir().join(format!("finder-api-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, catalog.to_string()).unwrap();
    path
}

fn create_state(catalog_path: PathBuf) -> AppState {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
    AppState {
        catalog: Arc::new(CatalogStore::from_file(catalog_path).unwrap()),
        autosave: Arc::new(Autosave::new(DraftStore::new(store.clone()))),
        sessions: SessionStore::new(store, "test"),
        matcher: Matcher::new(),
    }
}

fn scholarship_fields() -> Value {
    json!({
        "age": "20",
        "gender": "female",
        "state": "up",
        "category": "obc",
        "disability": "no",
        "singleChild": "no",
        "minority": "no",
        "qualification": "12th",
        "income": "50000-100000",
        "economicStatus": "bpl"
    })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let state = create_state(write_catalog("health"));
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_find_scholarships() {
    let state = create_state(write_catalog("find"));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/scholarships/find")
        .set_json(json!({ "fields": scholarship_fields() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["domain"], "scholarships");
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["total_candidates"], 2);
    assert_eq!(body["matches"][0]["name"], "Open Merit Award");
    assert_eq!(body["matches"][0]["provider"], "Education Board");
    assert_eq!(body["profile"]["income"], 50000);

    let recorded = state
        .autosave
        .drafts()
        .last_submission(DomainKind::Scholarships)
        .unwrap()
        .unwrap();
    assert_eq!(recorded.get("state"), Some("up"));
}

#[actix_web::test]
async fn test_find_reports_missing_fields() {
    let state = create_state(write_catalog("missing"));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/find")
        .set_json(json!({ "fields": { "age": "25", "qualification": " " } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"], json!(["qualification", "experience"]));
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_unknown_domain() {
    let state = create_state(write_catalog("unknown"));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/loans/find")
        .set_json(json!({ "fields": {} }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_catalog_failure_is_bad_gateway() {
    let state = create_state(PathBuf::from("/no/such/catalog.json"));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/scholarship/find")
        .set_json(json!({ "fields": scholarship_fields() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn test_entries_and_summary() {
    let state = create_state(write_catalog("entries"));
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/jobs/entries").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["jobType"], "onsite");

    let req = test::TestRequest::get().uri("/api/v1/catalog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["scholarships"], 2);
    assert_eq!(body["total"], 3);
}

#[actix_web::test]
async fn test_draft_lifecycle() {
    let state = create_state(write_catalog("drafts"));
    let app = init_app!(state);

    // Staged snapshots are not visible until flushed
    let req = test::TestRequest::put()
        .uri("/api/v1/drafts/scholarships")
        .set_json(json!({ "fields": { "age": "20", "state": "up" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let req = test::TestRequest::get().uri("/api/v1/drafts/scholarships").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fields"], json!({}));

    let req = test::TestRequest::post()
        .uri("/api/v1/drafts/scholarships/flush")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["flushed"], true);

    let req = test::TestRequest::get().uri("/api/v1/drafts/scholarships").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fields"]["state"], "up");
    assert_eq!(body["progress"], 20);

    // A successful submission clears the draft
    let req = test::TestRequest::post()
        .uri("/api/v1/scholarships/find")
        .set_json(json!({ "fields": scholarship_fields() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/drafts/scholarships").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fields"], json!({}));
    assert_eq!(body["progress"], 0);
}

#[actix_web::test]
async fn test_immediate_draft_and_delete() {
    let state = create_state(write_catalog("delete"));
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/v1/drafts/exams")
        .set_json(json!({ "fields": { "course": "btech" }, "immediate": true }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["saved"], true);

    assert!(state.autosave.drafts().load(DomainKind::Exams).unwrap().is_some());

    let req = test::TestRequest::delete().uri("/api/v1/drafts/exams").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(state.autosave.drafts().load(DomainKind::Exams).unwrap().is_none());
}

#[actix_web::test]
async fn test_account_flow() {
    let state = create_state(write_catalog("account"));
    let app = init_app!(state);

    let signup = json!({ "email": "asha@example.com", "password": "password123" });

    let req = test::TestRequest::post()
        .uri("/api/v1/account/signup")
        .set_json(&signup)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/account/signup")
        .set_json(&signup)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/account/signup")
        .set_json(json!({ "email": "ravi@example.com", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/v1/account/me").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["displayName"], "asha");

    let req = test::TestRequest::post()
        .uri("/api/v1/account/saved")
        .set_json(json!({ "name": "Open Merit Award", "domain": "scholarships" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/api/v1/account/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri("/api/v1/account/login")
        .set_json(json!({ "email": "asha@example.com", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/account/login")
        .set_json(json!({ "email": "ASHA@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/account/saved").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["name"], "Open Merit Award");
}

#[actix_web::test]
async fn test_find_with_numeric_fields_and_malformed_entry() {
    let catalog = json!({
        "jobs": [
            { "name": "Broken Listing", "eligibility": { "minAge": true, "qualifications": "graduate" } },
            { "name": "Analyst", "eligibility": { "minAge": "21", "qualifications": ["graduate"] } },
            { "name": "Senior Analyst", "eligibility": { "minAge": 30 } }
        ]
    });
    let path = std::env::temp_dir().join(format!("finder-api-lenient-{}.json", std::process::id()));
    std::fs::write(&path, catalog.to_string()).unwrap();

    let state = create_state(path);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/find")
        .set_json(json!({ "fields": { "age": 25, "qualification": "graduate", "experience": "1-2" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_candidates"], 3);
    assert_eq!(body["matches"][0]["name"], "Broken Listing");
    assert_eq!(body["matches"][1]["name"], "Analyst");
    assert_eq!(body["total_results"], 2);
    assert_eq!(body["profile"]["age"], 25);
}
