mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::Ranker;
use crate::routes::matches::AppState;
use crate::services::{DirectoryClient, FileCatalog, MentorCatalog};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for payload deserialization errors
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
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration first so the logging section can shape the subscriber
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging from settings; RUST_LOG and LOG_FORMAT still win
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Chai Match mentor ranking service...");
    info!("Configuration loaded successfully");

    // Build the catalog provider the engine will rank against
    let catalog = match settings.catalog.source.as_str() {
        "directory" => {
            let endpoint = settings.catalog.endpoint.clone().unwrap_or_else(|| {
                error!("catalog.source = \"directory\" requires catalog.endpoint");
                panic!("Missing catalog endpoint");
            });
            let api_key = settings.catalog.api_key.clone().unwrap_or_default();

            info!("Using live mentor directory at {}", endpoint);
            MentorCatalog::Directory(DirectoryClient::new(endpoint, api_key))
        }
        _ => {
            let path = settings
                .catalog
                .path
                .clone()
                .unwrap_or_else(|| "data/mentors.json".to_string());

            let file_catalog = FileCatalog::load(&path).unwrap_or_else(|e| {
                error!("Failed to load mentor roster from {}: {}", path, e);
                panic!("Roster load error: {}", e);
            });

            info!("Using file roster {} ({} mentors)", path, file_catalog.len());
            MentorCatalog::File(file_catalog)
        }
    };

    // Initialize the ranker with configured weights and thresholds
    let ranking_config = settings.ranking_config();
    let ranker = Ranker::new(ranking_config.clone());

    info!("Ranker initialized with config: {:?}", ranking_config);

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        ranker,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
