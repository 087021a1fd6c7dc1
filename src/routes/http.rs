// GET handlers: version, api/stats

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::collector::CollectionError;
use crate::models::StatsResponse;

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/stats: runs the probes and returns a fresh snapshot.
pub(super) async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, CollectionError> {
    let snapshot = state.collector.collect().await?;
    Ok(Json(StatsResponse::from(&snapshot)))
}

impl IntoResponse for CollectionError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "stats collection failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Failed to fetch stats" })),
        )
            .into_response()
    }
}
