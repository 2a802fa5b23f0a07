use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::server::AppContext;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Informational endpoints
        crate::handlers::home::home,
        crate::handlers::health::health_check,
        crate::handlers::models::list_models,

        // Prediction endpoints
        crate::handlers::predict::predict,
        crate::handlers::predict::preflight,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::models::ModelsResponse,
            crate::handlers::predict::PredictionRequest,
            crate::handlers::predict::PredictionResponse,
            crate::handlers::predict::PreflightResponse,
            crate::error::ApiErrorResponse,
            diagnosis_engine::RankedCondition,
            diagnosis_engine::RiskTier,
            treatment_knowledge::TreatmentEntry,
        )
    ),
    tags(
        (name = "info", description = "Landing page, health and model status"),
        (name = "prediction", description = "Disease prediction with treatment guidance"),
    ),
    info(
        title = "MediCare AI API",
        version = "1.0.0",
        description = "Predicts a likely condition from symptoms and demographics, with a risk tier and treatment guidance.",
    ),
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create OpenAPI documentation routes
pub fn create_docs_routes() -> Router<AppContext> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
