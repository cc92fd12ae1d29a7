// src/routes/health.rs
//! API health check endpoint for the GasTrack backend.
//!
//! Defines the `/health` route used by container orchestrators and CI
//! pipelines to verify that the service is running and able to respond to
//! HTTP requests. Sibling module in the `routes` directory following the
//! Explicit Module Boundary Pattern (EMBP): the gateway merges this subrouter
//! so that `main.rs` does not need to know about individual endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Returns a static JSON object indicating the API is reachable. Deliberately
/// lightweight: does not touch the database.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the gateway
/// router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
