//! Bulk-ingest endpoint for analyzer readings.
//!
//! Internal to this file: the `POST /readings/ingest` handler. Exports to the
//! gateway (`mod.rs`): a subrouter containing the route (EMBP).

use axum::{
    body::Bytes, extract::State, http::StatusCode, response::IntoResponse, routing::post, Json,
    Router,
};
use sqlx::SqlitePool;
use tracing::{error, info};

use super::StatusResponse;
use crate::{store, AnalyzerReading};

// ---

pub fn router() -> Router<SqlitePool> {
    // ---
    Router::new().route("/readings/ingest", post(handler))
}

/// Handle `POST /readings/ingest`.
///
/// Decodes the body into a batch of [`AnalyzerReading`]s and appends them in
/// one transaction. A decode failure (malformed JSON, missing timestamp,
/// sample point outside the enumeration) is a 400 carrying serde's
/// description of the violation; a storage failure is a 500 with the whole
/// batch rolled back.
async fn handler(State(pool): State<SqlitePool>, body: Bytes) -> impl IntoResponse {
    // ---
    let readings: Vec<AnalyzerReading> = match serde_json::from_slice(&body) {
        Ok(readings) => readings,
        Err(e) => {
            info!("POST /readings/ingest rejected: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(StatusResponse::error(format!(
                    "invalid analyzer reading payload: {}",
                    e
                ))),
            )
                .into_response();
        }
    };

    match store::ingest_analyzer_readings(&pool, &readings).await {
        Ok(written) => {
            info!("POST /readings/ingest wrote {} rows", written);
            (
                StatusCode::CREATED,
                Json(StatusResponse::success(format!("{} ingested", written))),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to ingest analyzer readings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::error(format!(
                    "database ingestion failed: {}",
                    e
                ))),
            )
                .into_response()
        }
    }
}
