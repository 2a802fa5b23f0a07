use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use diagnosis_engine::{assemble, model_choice, RankedCondition, RiskTier};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorResponse};
use crate::middleware::preflight_headers;
use crate::server::AppContext;

/// Prediction request body. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PredictionRequest {
    #[schema(example = 1)]
    pub fever: Option<i64>,
    #[schema(example = 1)]
    pub cough: Option<i64>,
    #[schema(example = 0)]
    pub fatigue: Option<i64>,
    #[schema(example = 0)]
    pub breathing: Option<i64>,
    /// Defaults to 30
    #[schema(example = 45)]
    pub age: Option<i64>,
    /// 1 for male, anything else female
    #[schema(example = 0)]
    pub gender: Option<i64>,
    /// Category code, defaults to 1
    #[serde(rename = "bloodPressure")]
    #[schema(example = 1)]
    pub blood_pressure: Option<i64>,
    /// Category code, defaults to 1
    #[schema(example = 1)]
    pub cholesterol: Option<i64>,
    /// Echoed back as `model_used`, defaults to `rf`
    #[schema(example = "rf")]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    pub success: bool,
    #[schema(example = "Influenza")]
    pub disease: String,
    /// Percent, two decimals
    #[schema(example = 87.5)]
    pub confidence: f64,
    pub risk: RiskTier,
    /// Up to five most probable conditions, best first
    pub top5: Vec<RankedCondition>,
    pub medicines: Vec<String>,
    pub advice: Vec<String>,
    #[schema(example = "rf")]
    pub model_used: String,
    /// RFC 3339, UTC
    #[schema(example = "2026-01-15T10:30:00.123456Z")]
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreflightResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Diagnose a patient from symptoms and demographics
#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Diagnosis with treatment guidance", body = PredictionResponse),
        (status = 400, description = "Missing or malformed JSON body", body = ApiErrorResponse),
        (status = 413, description = "Body larger than the server buffers", body = ApiErrorResponse),
        (status = 500, description = "Model absent or prediction failed", body = ApiErrorResponse)
    )
)]
pub async fn predict(
    State(ctx): State<AppContext>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let payload = parse_payload(&body?)?;
    debug!(payload = %payload, "Received prediction request");

    let features = assemble(&payload)?;
    let model_used = model_choice(&payload);

    if !ctx.engine.model_loaded() {
        return Err(ApiError::ModelNotLoaded);
    }

    let diagnosis = ctx.engine.diagnose(&features)?;
    let treatment = ctx.knowledge.lookup(&diagnosis.disease);

    Ok(Json(PredictionResponse {
        success: true,
        disease: diagnosis.disease,
        confidence: diagnosis.confidence,
        risk: diagnosis.risk,
        top5: diagnosis.top5,
        medicines: treatment.medicines.clone(),
        advice: treatment.advice.clone(),
        model_used,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    }))
}

/// Answer `OPTIONS /predict`, browser preflight or not, with the CORS headers
#[utoipa::path(
    options,
    path = "/predict",
    tag = "prediction",
    responses(
        (status = 200, description = "Preflight acknowledged", body = PreflightResponse)
    )
)]
pub async fn preflight() -> impl IntoResponse {
    (
        preflight_headers(),
        Json(PreflightResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Parse the raw body, rejecting empty bodies and falsy JSON values.
fn parse_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::NoData);
    }

    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    if is_falsy(&payload) {
        return Err(ApiError::NoData);
    }
    Ok(payload)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
