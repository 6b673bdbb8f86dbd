use crate::error::{HubError, Result};
use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let registry = state.registry();
    let codes = tokio::task::spawn_blocking(move || registry.count())
        .await
        .map_err(|e| HubError::Worker(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        codes,
    }))
}
