//! Disease classification core for MediCare AI
//!
//! Turns a loosely-typed symptom form into a ranked diagnosis:
//!
//! - [`features`] maps the request payload onto the trained column schema
//! - [`loader`] discovers the classifier and label encoder artifacts
//! - [`model`] is the [`Classifier`] seam and arg-max prediction
//! - [`ranking`] and [`risk`] derive the top-5 list and the risk tier
//! - [`engine`] ties them together behind [`DiagnosisEngine`]
//!
//! # Example
//!
//! ```rust
//! use diagnosis_engine::{assemble, risk, RiskTier};
//! use serde_json::json;
//!
//! let features = assemble(&json!({
//!     "fever": 1, "cough": 1, "fatigue": 1, "age": 70
//! })).unwrap();
//!
//! assert_eq!(features.symptom_count(), 3);
//! assert_eq!(risk::assess(&features), RiskTier::High);
//! ```

pub mod classifiers;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod features;
pub mod loader;
pub mod model;
pub mod ranking;
pub mod risk;

pub use classifiers::ModelArtifact;
pub use encoder::LabelEncoder;
pub use engine::{Diagnosis, DiagnosisEngine};
pub use error::{EngineError, EngineResult};
pub use features::{assemble, model_choice, FeatureVector, Gender, FEATURE_COLUMNS};
pub use loader::{read_encoder, read_model, ArtifactCandidates};
pub use model::{predict, Classifier, Prediction};
pub use ranking::{RankedCondition, TOP_K};
pub use risk::RiskTier;
