//! Read endpoint for emission/conversion factors.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sqlx::SqlitePool;
use tracing::error;

use super::StatusResponse;
use crate::store;

// ---

pub fn router() -> Router<SqlitePool> {
    // ---
    Router::new().route("/factors", get(handler))
}

/// Handle `GET /factors`.
///
/// Returns every stored factor as a JSON array, in no particular order —
/// callers that need ordering must sort.
async fn handler(State(pool): State<SqlitePool>) -> impl IntoResponse {
    // ---
    match store::get_all_factors(&pool).await {
        Ok(factors) => (StatusCode::OK, Json(factors)).into_response(),
        Err(e) => {
            error!("Failed to retrieve factors: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::error(format!(
                    "could not retrieve factors: {}",
                    e
                ))),
            )
                .into_response()
        }
    }
}
