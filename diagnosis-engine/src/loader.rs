//! Best-effort artifact discovery.
//!
//! Each artifact has an ordered list of candidate files. The first candidate
//! that reads, parses and validates wins; if none does the artifact is
//! absent, which the server treats as a degraded but running state.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::classifiers::ModelArtifact;
use crate::encoder::LabelEncoder;
use crate::error::{EngineError, EngineResult};
use crate::model::Classifier;

/// Classifier files tried in order
pub const DEFAULT_MODEL_CANDIDATES: [&str; 2] = ["best_model.json", "rf_model.json"];

/// Label encoder files tried in order
pub const DEFAULT_ENCODER_CANDIDATES: [&str; 2] = ["disease_encoder.json", "label_encoder.json"];

/// Ordered candidate paths for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCandidates {
    artifact: &'static str,
    paths: Vec<PathBuf>,
}

impl ArtifactCandidates {
    pub fn new<I, P>(artifact: &'static str, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            artifact,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn model_defaults() -> Self {
        Self::new("model", DEFAULT_MODEL_CANDIDATES)
    }

    pub fn encoder_defaults() -> Self {
        Self::new("label encoder", DEFAULT_ENCODER_CANDIDATES)
    }

    /// Join relative candidates onto `dir`; absolute ones are kept.
    #[must_use]
    pub fn resolve_against(self, dir: &Path) -> Self {
        let paths = self
            .paths
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { dir.join(p) })
            .collect();
        Self {
            artifact: self.artifact,
            paths,
        }
    }

    pub fn artifact(&self) -> &'static str {
        self.artifact
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Try each candidate with `load`, returning the first success.
    pub fn load_first<T, F>(&self, load: F) -> Option<T>
    where
        F: Fn(&Path) -> EngineResult<T>,
    {
        for path in &self.paths {
            match load(path) {
                Ok(value) => {
                    info!(artifact = self.artifact, path = %path.display(), "Loaded artifact");
                    return Some(value);
                }
                Err(e) => {
                    warn!(artifact = self.artifact, path = %path.display(), error = %e, "Artifact candidate rejected");
                }
            }
        }

        error!(
            artifact = self.artifact,
            candidates = ?self.paths,
            "No usable artifact found"
        );
        None
    }
}

/// Read, parse and validate a classifier artifact.
///
/// # Errors
///
/// [`EngineError::Io`] when the file cannot be read, [`EngineError::Parse`]
/// when it is not a known artifact layout, [`EngineError::InvalidArtifact`]
/// when validation fails.
pub fn read_model(path: &Path) -> EngineResult<Arc<dyn Classifier>> {
    let artifact: ModelArtifact = read_json(path)?;
    artifact.into_classifier()
}

/// Read and parse a label encoder artifact.
///
/// # Errors
///
/// [`EngineError::Io`] or [`EngineError::Parse`]; an empty or duplicated
/// class list is reported as a parse failure.
pub fn read_encoder(path: &Path) -> EngineResult<LabelEncoder> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
