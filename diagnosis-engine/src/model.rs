//! Classifier seam between the engine and a trained model.

use crate::error::{EngineError, EngineResult};
use crate::features::FeatureVector;

/// A trained multi-class classifier.
///
/// Implementations are immutable after loading and shared across requests.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Short identifier of the model family, e.g. `random_forest`.
    fn kind(&self) -> &'static str;

    /// Number of classes the model scores.
    fn n_classes(&self) -> usize;

    /// Class probability vector for one patient row.
    ///
    /// # Errors
    ///
    /// Returns an error when the row cannot be encoded for this model.
    fn predict_proba(&self, features: &FeatureVector) -> EngineResult<Vec<f64>>;
}

/// Raw classifier output for one row
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Arg-max class, lowest index on ties
    pub class_index: usize,
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Probability of the predicted class.
    pub fn probability(&self) -> f64 {
        self.probabilities
            .get(self.class_index)
            .copied()
            .unwrap_or_default()
    }
}

/// Score `features` and pick the most probable class.
///
/// # Errors
///
/// Fails when the model errors, returns a vector whose length differs from
/// [`Classifier::n_classes`], or returns a non-finite probability.
pub fn predict(model: &dyn Classifier, features: &FeatureVector) -> EngineResult<Prediction> {
    let probabilities = model.predict_proba(features)?;

    let expected = model.n_classes();
    if probabilities.len() != expected || probabilities.is_empty() {
        return Err(EngineError::ShapeMismatch {
            expected,
            actual: probabilities.len(),
        });
    }
    if let Some(bad) = probabilities.iter().position(|p| !p.is_finite()) {
        return Err(EngineError::InvalidProbability(bad));
    }

    let class_index = argmax(&probabilities);
    Ok(Prediction {
        class_index,
        probabilities,
    })
}

/// First index holding the maximum value.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}
