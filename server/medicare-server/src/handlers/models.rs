use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::AppContext;

/// Model labels the frontend can request
pub const AVAILABLE_MODELS: [&str; 3] = ["rf", "gb", "lr"];

/// Name reported for the artifact the server actually serves
pub const CURRENT_MODEL: &str = "best_model";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelsResponse {
    #[schema(example = json!(["rf", "gb", "lr"]))]
    pub available_models: Vec<String>,
    #[schema(example = "best_model")]
    pub current_model: String,
    /// Classes known to the label encoder, 0 when none is loaded
    #[schema(example = 41)]
    pub diseases_count: usize,
}

/// Model labels and the number of diseases the encoder knows
#[utoipa::path(
    get,
    path = "/models",
    tag = "info",
    responses(
        (status = 200, description = "Model information", body = ModelsResponse)
    )
)]
pub async fn list_models(State(ctx): State<AppContext>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        available_models: AVAILABLE_MODELS.iter().map(|m| (*m).to_string()).collect(),
        current_model: CURRENT_MODEL.to_string(),
        diseases_count: ctx.engine.diseases_count(),
    })
}
