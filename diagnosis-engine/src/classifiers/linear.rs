use serde::{Deserialize, Serialize};

use super::{check_feature_names, encode, CategoryEncoding};
use crate::error::{EngineError, EngineResult};
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::model::Classifier;

/// Per-column standardisation applied before the linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn validate(&self) -> EngineResult<()> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(EngineError::InvalidArtifact(format!(
                "scaler expects {FEATURE_COUNT} columns, has mean {} and scale {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(EngineError::InvalidArtifact(
                "scaler has a zero or non-finite scale".to_string(),
            ));
        }
        Ok(())
    }

    fn transform(&self, row: &mut [f64; FEATURE_COUNT]) {
        for ((x, mean), scale) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            *x = (*x - mean) / scale;
        }
    }
}

/// Multinomial logistic regression.
///
/// One coefficient row per class scored through a softmax. A single row is
/// the binary form: the row scores class 1 and class 0 gets the complement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub categories: CategoryEncoding,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    pub(crate) fn validate(&self) -> EngineResult<()> {
        check_feature_names(&self.feature_names)?;
        self.categories.validate()?;
        if let Some(scaler) = &self.scaler {
            scaler.validate()?;
        }

        if self.coefficients.is_empty() {
            return Err(EngineError::InvalidArtifact(
                "logistic regression has no coefficients".to_string(),
            ));
        }
        if let Some((class, row)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != FEATURE_COUNT)
        {
            return Err(EngineError::InvalidArtifact(format!(
                "coefficient row {class} has {} weights, expected {FEATURE_COUNT}",
                row.len()
            )));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(EngineError::InvalidArtifact(format!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }

    fn decision_function(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, bias)| {
                weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + bias
            })
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_classes(&self) -> usize {
        match self.coefficients.len() {
            1 => 2,
            n => n,
        }
    }

    fn predict_proba(&self, features: &FeatureVector) -> EngineResult<Vec<f64>> {
        let mut row = encode(features, &self.categories)?;
        if let Some(scaler) = &self.scaler {
            scaler.transform(&mut row);
        }

        let scores = self.decision_function(&row);
        match scores.as_slice() {
            [score] => {
                let p = sigmoid(*score);
                Ok(vec![1.0 - p, p])
            }
            _ => Ok(softmax(&scores)),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
