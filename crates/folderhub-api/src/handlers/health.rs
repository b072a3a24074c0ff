//! Health check handler.

use axum::Json;
use axum::extract::State;

use folderhub_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /health
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    if !state.stores.health_check().await? {
        return Err(AppError::store_failure("Store is not reachable").into());
    }

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        backend: state.stores.backend().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
