use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::encoder::LabelEncoder;
use crate::error::EngineResult;

/// Number of alternatives reported with each diagnosis
pub const TOP_K: usize = 5;

/// A condition with its confidence in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedCondition {
    pub disease: String,
    pub confidence: f64,
}

/// Probability in `[0, 1]` as a percentage rounded to two decimals.
///
/// Exact halves round to the even hundredth, so `1/32` reports `3.12`.
pub fn confidence_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round_ties_even() / 100.0
}

/// Indices of the `k` highest probabilities, best first.
///
/// Stable sort: equal probabilities keep ascending class-index order.
pub fn top_k(probabilities: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

/// Top-`k` classes decoded to disease names.
///
/// # Errors
///
/// Fails if a ranked index has no label in `encoder`.
pub fn rank(
    probabilities: &[f64],
    encoder: &LabelEncoder,
    k: usize,
) -> EngineResult<Vec<RankedCondition>> {
    top_k(probabilities, k)
        .into_iter()
        .map(|(index, p)| {
            Ok(RankedCondition {
                disease: encoder.decode(index)?.to_string(),
                confidence: confidence_percent(p),
            })
        })
        .collect()
}
