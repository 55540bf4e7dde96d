use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, HealthResponse};

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        translation_enabled: state.gateway.is_enabled(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
