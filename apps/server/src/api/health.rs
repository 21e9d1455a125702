use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::main_lib::AppState;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz(State(state): State<Arc<AppState>>) -> &'static str {
    tracing::debug!("Readiness probe, provider {}", state.provider_id);
    "ok"
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
