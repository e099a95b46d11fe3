//! Health endpoint — service version and store reachability.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /api/health` — verifies core lib and user-store connectivity.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let db_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("user store ping failed: {e}");
            false
        }
    };

    Ok(Json(HealthResponse {
        status: if db_connected { "ok" } else { "degraded" }.to_string(),
        version: sigo_core::version().to_string(),
        db_connected,
    }))
}
