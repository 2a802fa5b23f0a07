use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Invalid label encoder: {0}")]
    InvalidEncoder(String),

    #[error("Request payload must be a JSON object, got {0}")]
    InvalidPayload(String),

    #[error("Field '{field}' expects an integer, got {value}")]
    Coercion { field: &'static str, value: String },

    #[error("Unknown category '{value}' for feature '{column}'")]
    UnknownCategory { column: &'static str, value: String },

    #[error("Model produced {actual} probabilities, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Model produced a non-finite probability for class {0}")]
    InvalidProbability(usize),

    #[error("Label encoder knows {classes} classes but the model scores {probabilities}")]
    EncoderMismatch { classes: usize, probabilities: usize },

    #[error("Class index {index} is out of range for {classes} classes")]
    ClassOutOfRange { index: usize, classes: usize },

    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Label encoder not loaded")]
    EncoderNotLoaded,
}

pub type EngineResult<T> = Result<T, EngineError>;
