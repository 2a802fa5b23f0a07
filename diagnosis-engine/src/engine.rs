use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::encoder::LabelEncoder;
use crate::error::{EngineError, EngineResult};
use crate::features::FeatureVector;
use crate::loader::{read_encoder, read_model, ArtifactCandidates};
use crate::model::{predict, Classifier};
use crate::ranking::{confidence_percent, rank, RankedCondition, TOP_K};
use crate::risk::{assess, RiskTier};

/// Outcome of one diagnosis
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub disease: String,
    /// Percent, two decimals
    pub confidence: f64,
    pub risk: RiskTier,
    pub top5: Vec<RankedCondition>,
    pub class_index: usize,
}

/// Loaded classifier and label encoder.
///
/// Either part may be absent when no artifact could be loaded. The engine
/// is immutable once built and is shared across request handlers.
#[derive(Clone, Default)]
pub struct DiagnosisEngine {
    model: Option<Arc<dyn Classifier>>,
    encoder: Option<LabelEncoder>,
}

impl DiagnosisEngine {
    pub fn new(model: Option<Arc<dyn Classifier>>, encoder: Option<LabelEncoder>) -> Self {
        Self { model, encoder }
    }

    /// Discover both artifacts. Never fails; missing parts stay absent.
    pub fn load(models: &ArtifactCandidates, encoders: &ArtifactCandidates) -> Self {
        let model = models.load_first(read_model);
        let encoder = encoders.load_first(read_encoder);

        if let (Some(model), Some(encoder)) = (&model, &encoder) {
            if model.n_classes() != encoder.len() {
                // every prediction will fail with EncoderMismatch
                warn!(
                    model_classes = model.n_classes(),
                    encoder_classes = encoder.len(),
                    "Model and label encoder disagree on the number of classes"
                );
            }
        }

        Self::new(model, encoder)
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn encoder_loaded(&self) -> bool {
        self.encoder.is_some()
    }

    /// Model family of the loaded classifier
    pub fn model_kind(&self) -> Option<&'static str> {
        self.model.as_ref().map(|m| m.kind())
    }

    /// Number of classes the label encoder knows, 0 when absent.
    pub fn diseases_count(&self) -> usize {
        self.encoder.as_ref().map_or(0, LabelEncoder::len)
    }

    pub fn encoder(&self) -> Option<&LabelEncoder> {
        self.encoder.as_ref()
    }

    /// Classify one patient row and rank the alternatives.
    ///
    /// # Errors
    ///
    /// [`EngineError::ModelNotLoaded`] or [`EngineError::EncoderNotLoaded`]
    /// when a part is absent, [`EngineError::EncoderMismatch`] when the
    /// encoder and the probability vector disagree in length, and any
    /// error raised while scoring.
    pub fn diagnose(&self, features: &FeatureVector) -> EngineResult<Diagnosis> {
        let model = self.model.as_deref().ok_or(EngineError::ModelNotLoaded)?;
        let encoder = self.encoder.as_ref().ok_or(EngineError::EncoderNotLoaded)?;

        let prediction = predict(model, features)?;
        if prediction.probabilities.len() != encoder.len() {
            return Err(EngineError::EncoderMismatch {
                classes: encoder.len(),
                probabilities: prediction.probabilities.len(),
            });
        }
        debug!(probabilities = ?prediction.probabilities, "Model output");

        let disease = encoder.decode(prediction.class_index)?.to_string();
        let confidence = confidence_percent(prediction.probability());
        let top5 = rank(&prediction.probabilities, encoder, TOP_K)?;
        let risk = assess(features);

        info!(
            age = features.age,
            gender = %features.gender,
            fever = features.fever,
            cough = features.cough,
            fatigue = features.fatigue,
            breathing = features.difficulty_breathing,
            disease = %disease,
            confidence,
            risk = %risk,
            "Diagnosis complete"
        );

        Ok(Diagnosis {
            disease,
            confidence,
            risk,
            top5,
            class_index: prediction.class_index,
        })
    }
}

impl fmt::Debug for DiagnosisEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosisEngine")
            .field("model", &self.model_kind())
            .field("encoder", &self.encoder)
            .finish()
    }
}
