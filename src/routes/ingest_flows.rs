//! Bulk-ingest endpoint for daily flow inputs.
//!
//! Internal to this file: the `POST /flows/ingest` handler. Exports to the
//! gateway (`mod.rs`): a subrouter containing the route (EMBP).

use axum::{
    body::Bytes, extract::State, http::StatusCode, response::IntoResponse, routing::post, Json,
    Router,
};
use sqlx::SqlitePool;
use tracing::{error, info};

use super::StatusResponse;
use crate::{store, DailyFlowInput};

// ---

pub fn router() -> Router<SqlitePool> {
    // ---
    Router::new().route("/flows/ingest", post(handler))
}

/// Handle `POST /flows/ingest`.
///
/// Decodes the body into a batch of [`DailyFlowInput`]s and upserts them in
/// one transaction, replacing any existing row for the same date in full.
/// Decode failures are 400s, storage failures 500s with the batch rolled
/// back.
async fn handler(State(pool): State<SqlitePool>, body: Bytes) -> impl IntoResponse {
    // ---
    let flows: Vec<DailyFlowInput> = match serde_json::from_slice(&body) {
        Ok(flows) => flows,
        Err(e) => {
            info!("POST /flows/ingest rejected: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(StatusResponse::error(format!(
                    "invalid daily flow payload: {}",
                    e
                ))),
            )
                .into_response();
        }
    };

    match store::ingest_daily_flow_inputs(&pool, &flows).await {
        Ok(written) => {
            info!("POST /flows/ingest wrote {} rows", written);
            (
                StatusCode::CREATED,
                Json(StatusResponse::success(format!(
                    "{} ingested (replace)",
                    written
                ))),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to ingest daily flow inputs: {}", e);
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
