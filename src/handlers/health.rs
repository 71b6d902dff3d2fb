use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::AppState;

/// Component health status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Degraded,
}

/// Individual component health details
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    pub message: String,
}

/// Full health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub version: String,
    pub timestamp: String,
    pub uptime_secs: u64,
    pub details: HealthDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDetails {
    pub dataset: ComponentHealth,
}

/// Tracks application start time for uptime calculation
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize the start time (call this on application startup)
pub fn init_start_time() {
    let _ = START_TIME.get_or_init(Instant::now);
}

fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .route("/health/ready", get(readiness_check))
}

/// Basic liveness probe - just checks if the service is running
async fn liveness_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Readiness probe - the service holds its dataset in memory, so it is ready
/// as soon as it is serving requests. Dataset emptiness is reported but does
/// not fail the probe; ingestion happens through this same API.
async fn readiness_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (sales, inventory, _, _) = state.dataset.table_sizes();
    Json(json!({
        "status": "ready",
        "dataset_loaded": sales > 0 && inventory > 0,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Full health report with dataset table sizes
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (sales, inventory, products, promotions) = state.dataset.table_sizes();

    let dataset = if sales == 0 && inventory == 0 {
        ComponentHealth {
            status: ComponentStatus::Degraded,
            message: "no dataset loaded yet".to_string(),
        }
    } else {
        ComponentHealth {
            status: ComponentStatus::Up,
            message: format!(
                "{} sales series, {} inventory rows, {} products, {} promotion schedules",
                sales, inventory, products, promotions
            ),
        }
    };

    Json(HealthResponse {
        status: ComponentStatus::Up,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_secs: get_uptime_secs(),
        details: HealthDetails { dataset },
    })
}
