// Route exports
pub mod browse;
pub mod connections;
pub mod scheduling;

use crate::core::{AvailabilityBook, ConnectionLedger, GestureThresholds, MatchingSession};
use crate::services::{BackendClient, SnapshotCache};
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: Arc<SnapshotCache>,
    pub sessions: Arc<RwLock<HashMap<Uuid, MatchingSession>>>,
    pub connections: Arc<RwLock<ConnectionLedger>>,
    pub books: Arc<RwLock<HashMap<String, AvailabilityBook>>>,
    pub thresholds: GestureThresholds,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(browse::configure)
            .configure(connections::configure)
            .configure(scheduling::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let open_sessions = state.sessions.read().await.len();
    tracing::debug!("Health check ({} open sessions)", open_sessions);

    HttpResponse::Ok().json(crate::models::HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
