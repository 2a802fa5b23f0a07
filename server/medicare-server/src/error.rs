use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use diagnosis_engine::EngineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;
use uuid::Uuid;

const SEND_JSON_HINT: &str = "Please send JSON data";
const MODEL_MISSING_HINT: &str =
    "ML model files not found. Please ensure model artifact files are in the correct location.";
const PREDICTION_FAILED_HINT: &str = "Prediction failed. Check server logs for details.";
const UNREADABLE_BODY_HINT: &str = "Please send a JSON object no larger than 2 MB";

/// Error envelope returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,
    /// What went wrong
    #[schema(example = "No data provided")]
    pub error: String,
    /// What the client should do about it
    #[schema(example = "Please send JSON data")]
    pub message: String,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No data provided")]
    NoData,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("{}", .0.body_text())]
    UnreadableBody(#[from] BytesRejection),

    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("{0}")]
    Prediction(#[source] EngineError),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ModelNotLoaded => ApiError::ModelNotLoaded,
            other => ApiError::Prediction(other),
        }
    }
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoData | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody(rejection) => rejection.status(),
            ApiError::ModelNotLoaded | ApiError::Prediction(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NoData => "no_data",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::UnreadableBody(_) => "unreadable_body",
            ApiError::ModelNotLoaded => "model_not_loaded",
            ApiError::Prediction(_) => "prediction_failed",
        }
    }

    /// Client-facing hint for the `message` field
    pub fn hint(&self) -> &'static str {
        match self {
            ApiError::NoData | ApiError::InvalidJson(_) => SEND_JSON_HINT,
            ApiError::UnreadableBody(_) => UNREADABLE_BODY_HINT,
            ApiError::ModelNotLoaded => MODEL_MISSING_HINT,
            ApiError::Prediction(_) => PREDICTION_FAILED_HINT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = ?self,
                "API error occurred"
            );
        } else {
            // client mistakes stay out of the operational log
            debug!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "Rejected request"
            );
        }

        let body = ApiErrorResponse {
            success: false,
            error: self.to_string(),
            message: self.hint().to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}
