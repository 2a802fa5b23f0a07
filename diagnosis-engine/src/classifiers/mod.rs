//! On-disk classifier artifacts.
//!
//! The training pipeline exports the fitted estimator as JSON, tagged by
//! `kind`. Every artifact declares the feature columns it was fit on and how
//! categorical columns were ordinal-encoded, so a schema drift between the
//! trainer and this server is caught when the artifact loads instead of
//! silently producing wrong predictions.

pub mod forest;
pub mod linear;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::features::{FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};
use crate::model::Classifier;

pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use linear::{LogisticRegression, StandardScaler};

/// Columns holding category labels rather than numbers
pub const CATEGORICAL_COLUMNS: [&str; 1] = ["gender"];

/// A classifier as exported by the training pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    /// Validate the artifact and turn it into a shareable classifier.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidArtifact`] when the feature schema or the model
    /// structure is inconsistent.
    pub fn into_classifier(self) -> EngineResult<Arc<dyn Classifier>> {
        match self {
            Self::LogisticRegression(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
            Self::RandomForest(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }
}

/// Ordinal encoding of categorical columns, as fit at training time.
///
/// Defaults to `gender: [female, male]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryEncoding(BTreeMap<String, Vec<String>>);

impl CategoryEncoding {
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Self {
        Self(categories)
    }

    pub(crate) fn validate(&self) -> EngineResult<()> {
        for column in CATEGORICAL_COLUMNS {
            match self.0.get(column) {
                Some(levels) if !levels.is_empty() => {}
                _ => {
                    return Err(EngineError::InvalidArtifact(format!(
                        "no categories declared for column '{column}'"
                    )))
                }
            }
        }
        if let Some(extra) = self
            .0
            .keys()
            .find(|k| !CATEGORICAL_COLUMNS.contains(&k.as_str()))
        {
            return Err(EngineError::InvalidArtifact(format!(
                "column '{extra}' is not categorical"
            )));
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn code(&self, column: &'static str, label: &str) -> EngineResult<f64> {
        self.0
            .get(column)
            .and_then(|levels| levels.iter().position(|l| l == label))
            .map(|i| i as f64)
            .ok_or_else(|| EngineError::UnknownCategory {
                column,
                value: label.to_string(),
            })
    }
}

impl Default for CategoryEncoding {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "gender".to_string(),
            vec!["female".to_string(), "male".to_string()],
        );
        Self(categories)
    }
}

/// Check that declared feature names match [`FEATURE_COLUMNS`] exactly.
pub(crate) fn check_feature_names(names: &[String]) -> EngineResult<()> {
    let matches = names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_COLUMNS).all(|(a, b)| a == b);
    if matches {
        Ok(())
    } else {
        Err(EngineError::InvalidArtifact(format!(
            "feature names {names:?} do not match the expected schema {FEATURE_COLUMNS:?}"
        )))
    }
}

/// Numeric row in [`FEATURE_COLUMNS`] order.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn encode(
    features: &FeatureVector,
    categories: &CategoryEncoding,
) -> EngineResult<[f64; FEATURE_COUNT]> {
    Ok([
        features.fever as f64,
        features.cough as f64,
        features.fatigue as f64,
        features.difficulty_breathing as f64,
        features.age as f64,
        categories.code("gender", features.gender.label())?,
        features.blood_pressure as f64,
        features.cholesterol_level as f64,
    ])
}
