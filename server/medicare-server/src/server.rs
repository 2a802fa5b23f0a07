use std::sync::Arc;

use diagnosis_engine::DiagnosisEngine;
use tracing::{info, warn};
use treatment_knowledge::KnowledgeBase;

use crate::config::Settings;

/// Shared request state, built once before the server starts
#[derive(Clone, Debug)]
pub struct AppContext {
    /// Classifier and label encoder, either possibly absent
    pub engine: Arc<DiagnosisEngine>,
    /// Treatment guidance per condition
    pub knowledge: Arc<KnowledgeBase>,
    /// Effective settings
    pub settings: Arc<Settings>,
}

impl AppContext {
    pub fn new(engine: DiagnosisEngine, knowledge: KnowledgeBase, settings: Settings) -> Self {
        Self {
            engine: Arc::new(engine),
            knowledge: Arc::new(knowledge),
            settings: Arc::new(settings),
        }
    }

    /// Discover artifacts and build the built-in knowledge base.
    ///
    /// Missing artifacts are not an error; the server starts degraded and
    /// `/health` reports what is absent.
    pub fn from_settings(settings: Settings) -> Self {
        info!(artifact_dir = %settings.artifact_dir.display(), "Loading model artifacts");
        let engine = DiagnosisEngine::load(
            &settings.model_candidates(),
            &settings.encoder_candidates(),
        );

        if engine.model_loaded() && engine.encoder_loaded() {
            info!(
                model = engine.model_kind().unwrap_or_default(),
                diseases = engine.diseases_count(),
                "Model ready"
            );
        } else {
            warn!(
                model_loaded = engine.model_loaded(),
                encoder_loaded = engine.encoder_loaded(),
                "Serving without a complete model; /predict will fail"
            );
        }

        let knowledge = KnowledgeBase::builtin();
        info!(conditions = knowledge.len(), "Knowledge base ready");

        Self::new(engine, knowledge, settings)
    }
}
