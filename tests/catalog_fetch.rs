// Catalog loading against a mock HTTP server and local files

use mockito::Server;
use opportunity_finder::core::{Jobs, Matcher};
use opportunity_finder::models::FormData;
use opportunity_finder::services::{CatalogError, CatalogSource, CatalogStore};
use std::time::Duration;

const CATALOG_BODY: &str = r#"{
    "scholarships": [
        { "name": "Merit Award", "eligibility": { "minAge": 18, "categories": ["general"] } }
    ],
    "exams": [
        { "name": "NEET", "eligibility": { "courses": ["mbbs"], "passingYears": [2024, "2025"] } }
    ]
}"#;

fn create_store(url: String) -> CatalogStore {
    CatalogStore::new(CatalogSource::Url(url), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_catalog_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/catalog.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG_BODY)
        .create_async()
        .await;

    let store = create_store(format!("{}/catalog.json", server.url()));
    let catalog = store.load().await.unwrap();

    mock.assert_async().await;
    assert_eq!(catalog.scholarships.len(), 1);
    assert_eq!(catalog.exams.len(), 1);
    assert!(catalog.jobs.is_empty());
    assert_eq!(
        catalog.exams[0].eligibility.passing_years,
        Some(vec!["2024".to_string(), "2025".to_string()])
    );
}

#[tokio::test]
async fn test_fetch_catalog_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/catalog.json")
        .with_status(500)
        .create_async()
        .await;

    let store = create_store(format!("{}/catalog.json", server.url()));

    match store.load().await {
        Err(CatalogError::Status(code)) => assert_eq!(code, 500),
        other => panic!("expected status error, got {:?}", other.map(|c| c.total_entries())),
    }
}

#[tokio::test]
async fn test_fetch_catalog_with_malformed_entry() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/catalog.json")
        .with_status(200)
        .with_body(
            r#"{ "jobs": [
                { "name": "Clerk", "eligibility": { "minAge": "eighteen", "qualifications": ["12th"] } },
                { "name": "Analyst", "eligibility": { "minAge": 21, "qualifications": ["graduate"] } }
            ] }"#,
        )
        .create_async()
        .await;

    let store = create_store(format!("{}/catalog.json", server.url()));
    let catalog = store.load().await.unwrap();
    assert_eq!(catalog.jobs.len(), 2);
    assert!(catalog.jobs[0].eligibility.min_age.is_none());

    let form: FormData = [("age", "25"), ("qualification", "graduate"), ("experience", "fresher")]
        .into_iter()
        .collect();
    let submission = Matcher::new().submit::<Jobs>(&form, &catalog).unwrap();
    let names: Vec<&str> = submission.result.matches.iter().map(|job| job.name.as_str()).collect();
    assert_eq!(names, vec!["Analyst"]);
}

#[test]
fn test_load_catalog_file() {
    let path = std::env::temp_dir().join(format!("finder-catalog-{}.json", std::process::id()));
    std::fs::write(&path, CATALOG_BODY).unwrap();

    let store = CatalogStore::from_file(&path).unwrap();
    let catalog = tokio_test::block_on(store.load()).unwrap();
    assert_eq!(catalog.total_entries(), 2);

    std::fs::remove_file(&path).ok();
}
