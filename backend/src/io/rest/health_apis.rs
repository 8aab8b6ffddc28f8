use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use shared::HealthResponse;
use tracing::{debug, error};

use crate::io::rest::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /api/health; 503 when the record store does not answer
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /api/health");

    let version = env!("CARGO_PKG_VERSION").to_string();
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                version,
            }),
        ),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    version,
                }),
            )
        }
    }
}
