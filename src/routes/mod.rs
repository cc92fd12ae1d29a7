use axum::Router;
use serde::Serialize;
use sqlx::SqlitePool;

mod factors;
mod health;
mod ingest_flows;
mod ingest_readings;

// ---

/// JSON envelope used by every ingestion response, success or failure.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: String) -> Self {
        // ---
        StatusResponse {
            status: "success",
            message,
        }
    }

    pub fn error(message: String) -> Self {
        // ---
        StatusResponse {
            status: "error",
            message,
        }
    }
}

pub fn router(pool: SqlitePool) -> Router {
    // ---
    Router::new()
        .merge(ingest_readings::router())
        .merge(ingest_flows::router())
        .merge(factors::router())
        .merge(health::router())
        .with_state(pool)
}
