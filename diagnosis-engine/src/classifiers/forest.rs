use serde::{Deserialize, Serialize};

use super::{check_feature_names, encode, CategoryEncoding};
use crate::error::{EngineError, EngineResult};
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::model::Classifier;

/// A node of a fitted decision tree.
///
/// Splits send a row left when `row[feature] <= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class counts or weights at this leaf
        value: Vec<f64>,
    },
}

/// Flattened tree, root at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_classes: usize) -> EngineResult<()> {
        if self.nodes.is_empty() {
            return Err(EngineError::InvalidArtifact("tree has no nodes".to_string()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(EngineError::InvalidArtifact(format!(
                            "node {index} splits on unknown feature {feature}"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(EngineError::InvalidArtifact(format!(
                            "node {index} has a NaN threshold"
                        )));
                    }
                    // children strictly after their parent keeps every walk finite
                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(EngineError::InvalidArtifact(format!(
                                "node {index} points at invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(EngineError::InvalidArtifact(format!(
                            "leaf {index} has {} values, expected {n_classes}",
                            value.len()
                        )));
                    }
                    let total: f64 = value.iter().sum();
                    if value.iter().any(|v| *v < 0.0 || !v.is_finite()) || total <= 0.0 {
                        return Err(EngineError::InvalidArtifact(format!(
                            "leaf {index} has an invalid class distribution"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalised class distribution of the leaf `row` lands in.
    fn leaf_distribution(&self, row: &[f64; FEATURE_COUNT]) -> EngineResult<Vec<f64>> {
        let mut index = 0;
        loop {
            let node = self.nodes.get(index).ok_or_else(|| {
                EngineError::InvalidArtifact(format!("walked off the tree at node {index}"))
            })?;
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = row.get(*feature).copied().unwrap_or_default();
                    index = if x <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    return Ok(value.iter().map(|v| v / total).collect());
                }
            }
        }
    }
}

/// Bagged ensemble of decision trees; probabilities are the mean of the
/// per-tree leaf distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub categories: CategoryEncoding,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn validate(&self) -> EngineResult<()> {
        check_feature_names(&self.feature_names)?;
        self.categories.validate()?;
        if self.n_classes == 0 {
            return Err(EngineError::InvalidArtifact(
                "random forest declares zero classes".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(EngineError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_classes).map_err(|e| match e {
                EngineError::InvalidArtifact(reason) => {
                    EngineError::InvalidArtifact(format!("tree {i}: {reason}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    #[allow(clippy::cast_precision_loss)]
    fn predict_proba(&self, features: &FeatureVector) -> EngineResult<Vec<f64>> {
        let row = encode(features, &self.categories)?;

        let mut sums = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let distribution = tree.leaf_distribution(&row)?;
            for (sum, p) in sums.iter_mut().zip(distribution) {
                *sum += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(sums.into_iter().map(|s| s / n_trees).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COLUMNS;

    fn forest(trees: Vec<DecisionTree>, n_classes: usize) -> RandomForest {
        RandomForest {
            feature_names: FEATURE_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            categories: CategoryEncoding::default(),
            n_classes,
            trees,
        }
    }

    /// fever <= 0.5 → class 0, otherwise class 1
    fn fever_stump() -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    value: vec![8.0, 2.0],
                },
                TreeNode::Leaf {
                    value: vec![1.0, 3.0],
                },
            ],
        }
    }

    #[test]
    fn test_single_tree_walk() {
        let rf = forest(vec![fever_stump()], 2);
        rf.validate().unwrap();

        let healthy = rf.predict_proba(&FeatureVector::default()).unwrap();
        assert_eq!(healthy, vec![0.8, 0.2]);

        let feverish = FeatureVector {
            fever: 1,
            ..FeatureVector::default()
        };
        let sick = rf.predict_proba(&feverish).unwrap();
        assert_eq!(sick, vec![0.25, 0.75]);
    }

    #[test]
    fn test_trees_are_averaged() {
        let constant = DecisionTree {
            nodes: vec![TreeNode::Leaf {
                value: vec![0.0, 1.0],
            }],
        };
        let rf = forest(vec![fever_stump(), constant], 2);
        rf.validate().unwrap();

        let probs = rf.predict_proba(&FeatureVector::default()).unwrap();
        assert!((probs[0] - 0.4).abs() < 1e-12);
        assert!((probs[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_nodes_parse_untagged() {
        let json = serde_json::json!({
            "nodes": [
                {"feature": 4, "threshold": 60.0, "left": 1, "right": 2},
                {"value": [1.0, 0.0]},
                {"value": [0.0, 1.0]}
            ]
        });
        let tree: DecisionTree = serde_json::from_value(json).unwrap();
        assert!(matches!(tree.nodes[0], TreeNode::Split { feature: 4, .. }));
        assert!(matches!(tree.nodes[2], TreeNode::Leaf { .. }));
        assert!(tree.validate(2).is_ok());
    }

    #[test]
    fn test_rejects_cycles_and_bad_children() {
        let cyclic = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { value: vec![1.0] },
            ],
        };
        assert!(cyclic.validate(1).is_err());

        let dangling = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.5,
                left: 1,
                right: 7,
            }],
        };
        assert!(dangling.validate(1).is_err());
    }

    #[test]
    fn test_rejects_bad_leaves_and_features() {
        let wide_leaf = DecisionTree {
            nodes: vec![TreeNode::Leaf {
                value: vec![1.0, 1.0, 1.0],
            }],
        };
        assert!(wide_leaf.validate(2).is_err());

        let empty_leaf = DecisionTree {
            nodes: vec![TreeNode::Leaf {
                value: vec![0.0, 0.0],
            }],
        };
        assert!(empty_leaf.validate(2).is_err());

        let bad_feature = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: FEATURE_COUNT,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: vec![1.0] },
                TreeNode::Leaf { value: vec![1.0] },
            ],
        };
        assert!(bad_feature.validate(1).is_err());
    }

    #[test]
    fn test_forest_validation_names_the_tree() {
        let broken = DecisionTree { nodes: vec![] };
        let rf = forest(vec![fever_stump(), broken], 2);
        let err = rf.validate().unwrap_err();
        assert!(err.to_string().contains("tree 1"));

        assert!(forest(vec![], 2).validate().is_err());
        assert!(forest(vec![fever_stump()], 0).validate().is_err());
    }
}
