use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use opportunity_finder::config::{LoggingSettings, Settings};
use opportunity_finder::core::Matcher;
use opportunity_finder::routes::{self, AppState};
use opportunity_finder::services::{
    Autosave, CatalogStore, DraftStore, KeyValueStore, MemoryStore, SessionStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// LOG_LEVEL / LOG_FORMAT win over the configured values; RUST_LOG wins over both.
fn init_logging(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = Settings::load();
    init_logging(
        &loaded
            .as_ref()
            .map(|s| s.logging.clone())
            .unwrap_or_default(),
    );

    info!("Starting opportunity finder...");

    let settings = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    // Catalog source
    let timeout = Duration::from_secs(settings.catalog.timeout_secs.unwrap_or(30));
    let catalog = CatalogStore::new(settings.catalog.source(), timeout).map_err(|e| {
        error!("Failed to initialize catalog client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Catalog source: {}", catalog.source());

    // Drafts and demo accounts share one in-process store
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new(settings.drafts.capacity));

    let autosave = Arc::new(Autosave::new(DraftStore::new(store.clone())));
    let interval = Duration::from_secs(settings.drafts.autosave_interval_secs.max(1));
    let autosave_task = autosave.spawn(interval);

    info!("Draft auto-save every {}s", interval.as_secs());

    let sessions = SessionStore::new(store, &settings.session.namespace);

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        autosave: autosave.clone(),
        sessions,
        matcher: Matcher::new(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    let result = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await;

    // Anything still staged gets written before exit
    autosave_task.abort();
    let written = autosave.flush_all().await;
    if written > 0 {
        info!("Flushed {} staged draft(s) on shutdown", written);
    }

    result
}
