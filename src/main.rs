mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::{ConnectionLedger, DeclinePolicy, GestureThresholds};
use crate::routes::AppState;
use crate::services::{BackendClient, SnapshotCache};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

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
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_else(|_| self.to_string()))
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

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting MentorLink matching engine...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize backend client
    let backend = Arc::new(
        BackendClient::new(settings.backend.endpoint.clone(), settings.backend.api_key.clone())
            .unwrap_or_else(|e| {
                error!("Failed to create backend client: {}", e);
                panic!("Backend client error: {}", e);
            }),
    );

    info!("Backend client initialized for {}", settings.backend.endpoint);

    // Initialize candidate pool cache
    let cache = Arc::new(SnapshotCache::new(
        settings.cache.pool_cache_size,
        settings.cache.pool_ttl_secs,
    ));

    info!(
        "Pool cache initialized ({} entries, TTL: {}s)",
        settings.cache.pool_cache_size, settings.cache.pool_ttl_secs
    );

    // Gesture thresholds from configuration
    let thresholds = GestureThresholds {
        tap_max_duration_ms: settings.gesture.tap_max_duration_ms,
        tap_max_movement_px: settings.gesture.tap_max_movement_px,
        swipe_min_distance_px: settings.gesture.swipe_min_distance_px,
    };

    info!("Gesture thresholds: {:?}", thresholds);

    // Connection ledger with the configured decline policy
    let decline_policy = if settings.connection.allow_rerequest_after_decline {
        DeclinePolicy::AllowRerequest
    } else {
        DeclinePolicy::Terminal
    };

    // Build application state
    let app_state = AppState {
        backend,
        cache,
        sessions: Arc::new(RwLock::new(HashMap::new())),
        connections: Arc::new(RwLock::new(ConnectionLedger::new(decline_policy))),
        books: Arc::new(RwLock::new(HashMap::new())),
        thresholds,
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
