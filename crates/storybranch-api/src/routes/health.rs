//! Liveness endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the registry answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Registered stories; absent when the registry could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stories: Option<usize>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stories = match state.story_repository.count().await {
        Ok(count) => Some(count),
        Err(err) => {
            warn!(%err, "story registry unavailable");
            None
        }
    };

    Json(HealthResponse {
        status: if stories.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        stories,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
