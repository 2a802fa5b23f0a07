use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::AppContext;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    #[schema(example = "healthy")]
    pub status: String,
    /// Whether a classifier artifact was loaded
    pub model_loaded: bool,
    /// Whether a label encoder artifact was loaded
    pub encoder_loaded: bool,
    #[schema(example = "Backend is running!")]
    pub message: String,
}

/// Liveness plus artifact status.
///
/// Answers 200 even when artifacts are missing; the flags carry the
/// degradation.
#[utoipa::path(
    get,
    path = "/health",
    tag = "info",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: ctx.engine.model_loaded(),
        encoder_loaded: ctx.engine.encoder_loaded(),
        message: "Backend is running!".to_string(),
    })
}
