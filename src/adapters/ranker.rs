//! Tabular learned ranker loaded from a JSON artifact.
//!
//! Two model kinds are understood:
//!
//! ```json
//! {"kind": "linear", "weights": [0.7, -0.002, 0.05, 0.1], "bias": 0.0, "sigmoid": false}
//! ```
//!
//! ```json
//! {"kind": "tree_ensemble", "base_score": 0.5, "trees": [
//!     {"nodes": [
//!         {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
//!         {"leaf": -0.1},
//!         {"leaf": 0.2}
//!     ]}
//! ]}
//! ```
//!
//! Tree splits send a sample left when `value <= threshold`. Child indices
//! must point forward in the node list, which rules out cycles.

use super::traits::LearnedRanker;
use crate::error::{ErrorContext, ModelErrorKind, RecipeIntelError, Result};
use crate::scoring::ScoreFeatures;
use serde::Deserialize;
use std::path::Path;

/// File name looked up inside the models directory
pub const RANKER_ARTIFACT: &str = "ranker.json";

/// Parsed ranker artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankerModel {
    /// `bias + Σ wᵢ·xᵢ`, optionally passed through a sigmoid
    Linear {
        weights: [f64; ScoreFeatures::LEN],
        #[serde(default)]
        bias: f64,
        #[serde(default)]
        sigmoid: bool,
    },
    /// Sum of regression tree outputs plus a base score
    TreeEnsemble {
        #[serde(default)]
        base_score: f64,
        trees: Vec<RegressionTree>,
        #[serde(default)]
        sigmoid: bool,
    },
}

/// A binary regression tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

/// A split or a leaf.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

impl RegressionTree {
    fn validate(&self, tree_idx: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(malformed(format!("tree {tree_idx} has no nodes")));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= ScoreFeatures::LEN {
                        return Err(malformed(format!(
                            "tree {tree_idx} node {idx}: feature {feature} out of range"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(malformed(format!(
                            "tree {tree_idx} node {idx}: non-finite threshold"
                        )));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(malformed(format!(
                                "tree {tree_idx} node {idx}: invalid child index {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(malformed(format!(
                            "tree {tree_idx} node {idx}: non-finite leaf"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf.
    ///
    /// Returns `None` for a tree that would index out of bounds or step
    /// backwards, which only a hand-built, unvalidated tree can do.
    fn evaluate(&self, features: &[f64; ScoreFeatures::LEN]) -> Option<f64> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx)? {
                TreeNode::Leaf { leaf } => return Some(*leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let next = if *features.get(*feature)? <= *threshold {
                        *left
                    } else {
                        *right
                    };
                    if next <= idx {
                        return None;
                    }
                    idx = next;
                }
            }
        }
    }
}

impl RankerModel {
    /// Parse and validate an artifact.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Linear { weights, bias, .. } => {
                if weights.iter().chain(std::iter::once(bias)).any(|w| !w.is_finite()) {
                    return Err(malformed("non-finite linear coefficient"));
                }
            }
            Self::TreeEnsemble {
                base_score, trees, ..
            } => {
                if !base_score.is_finite() {
                    return Err(malformed("non-finite base score"));
                }
                for (idx, tree) in trees.iter().enumerate() {
                    tree.validate(idx)?;
                }
            }
        }
        Ok(())
    }

    /// Raw model output for a feature vector.
    ///
    /// Fails on a tree ensemble whose node structure is broken.
    pub fn evaluate(&self, features: &[f64; ScoreFeatures::LEN]) -> Result<f64> {
        match self {
            Self::Linear {
                weights,
                bias,
                sigmoid,
            } => {
                let raw = weights
                    .iter()
                    .zip(features.iter())
                    .fold(*bias, |acc, (w, x)| w.mul_add(*x, acc));
                Ok(apply_link(raw, *sigmoid))
            }
            Self::TreeEnsemble {
                base_score,
                trees,
                sigmoid,
            } => {
                let mut raw = *base_score;
                for (idx, tree) in trees.iter().enumerate() {
                    raw += tree.evaluate(features).ok_or_else(|| {
                        RecipeIntelError::inference(format!("tree {idx} has a broken node list"))
                    })?;
                }
                Ok(apply_link(raw, *sigmoid))
            }
        }
    }
}

fn apply_link(raw: f64, sigmoid: bool) -> f64 {
    if sigmoid {
        1.0 / (1.0 + (-raw).exp())
    } else {
        raw
    }
}

fn malformed(message: impl Into<String>) -> RecipeIntelError {
    RecipeIntelError::model(
        "parsing ranker artifact",
        ModelErrorKind::MalformedArtifact(message.into()),
    )
}

/// [`LearnedRanker`] backed by a [`RankerModel`] artifact.
#[derive(Debug, Clone)]
pub struct TabularRanker {
    model: RankerModel,
}

impl TabularRanker {
    /// Wrap an already-parsed model
    #[must_use]
    pub const fn new(model: RankerModel) -> Self {
        Self { model }
    }

    /// Load an artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecipeIntelError::artifact_not_found(path));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| RecipeIntelError::io(path, e))?;
        let model = RankerModel::from_json_str(&content)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok(Self::new(model))
    }

    /// The underlying model
    #[must_use]
    pub const fn model(&self) -> &RankerModel {
        &self.model
    }
}

impl LearnedRanker for TabularRanker {
    fn predict(&self, features: &[f64; ScoreFeatures::LEN]) -> Result<f64> {
        if features.iter().any(|x| !x.is_finite()) {
            return Err(RecipeIntelError::inference("non-finite input feature"));
        }
        let score = self.model.evaluate(features)?;
        if score.is_finite() {
            Ok(score)
        } else {
            Err(RecipeIntelError::inference(format!(
                "ranker produced non-finite score {score}"
            )))
        }
    }

    fn name(&self) -> &'static str {
        match self.model {
            RankerModel::Linear { .. } => "linear",
            RankerModel::TreeEnsemble { .. } => "tree-ensemble",
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TREE_JSON: &str = r#"{
        "kind": "tree_ensemble",
        "base_score": 0.5,
        "trees": [
            {"nodes": [
                {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
                {"leaf": -0.1},
                {"leaf": 0.2}
            ]},
            {"nodes": [{"leaf": 0.05}]}
        ]
    }"#;

    #[test]
    fn test_linear_model() {
        let model = RankerModel::from_json_str(
            r#"{"kind": "linear", "weights": [1.0, 0.0, 0.1, 0.0], "bias": 0.25}"#,
        )
        .unwrap();
        let ranker = TabularRanker::new(model);
        let score = ranker.predict(&[0.5, 10.0, 4.0, 0.6]).unwrap();
        assert!((score - (0.25 + 0.5 + 0.4)).abs() < 1e-12);
        assert_eq!(ranker.name(), "linear");
        assert!(ranker.is_available());
    }

    #[test]
    fn test_linear_sigmoid() {
        let model = RankerModel::from_json_str(
            r#"{"kind": "linear", "weights": [0.0, 0.0, 0.0, 0.0], "sigmoid": true}"#,
        )
        .unwrap();
        assert!((model.evaluate(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tree_ensemble() {
        let model = RankerModel::from_json_str(TREE_JSON).unwrap();
        // match_pct <= 0.5 goes left
        assert!((model.evaluate(&[0.5, 0.0, 0.0, 0.0]).unwrap() - 0.45).abs() < 1e-12);
        assert!((model.evaluate(&[0.75, 0.0, 0.0, 0.0]).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_backward_child() {
        let json = r#"{"kind": "tree_ensemble", "trees": [{"nodes": [
            {"feature": 0, "threshold": 0.5, "left": 0, "right": 1},
            {"leaf": 1.0}
        ]}]}"#;
        assert!(RankerModel::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_bad_feature_index() {
        let json = r#"{"kind": "tree_ensemble", "trees": [{"nodes": [
            {"feature": 4, "threshold": 0.5, "left": 1, "right": 2},
            {"leaf": 1.0}, {"leaf": 2.0}
        ]}]}"#;
        assert!(RankerModel::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(RankerModel::from_json_str(r#"{"kind": "neural"}"#).is_err());
    }

    #[test]
    fn test_non_finite_output_is_error() {
        let ranker = TabularRanker::new(RankerModel::Linear {
            weights: [f64::MAX, 0.0, 0.0, 0.0],
            bias: f64::MAX,
            sigmoid: false,
        });
        assert!(ranker.predict(&[10.0, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_unvalidated_broken_trees_are_errors() {
        let broken = [
            vec![],
            vec![TreeNode::Split {
                feature: 0,
                threshold: 0.5,
                left: 7,
                right: 8,
            }],
            vec![
                TreeNode::Split {
                    feature: 9,
                    threshold: 0.5,
                    left: 1,
                    right: 1,
                },
                TreeNode::Leaf { leaf: 1.0 },
            ],
            vec![
                TreeNode::Leaf { leaf: 1.0 },
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 0,
                },
            ],
        ];
        // the last tree is fine because its root is a leaf
        for (idx, nodes) in broken.into_iter().enumerate() {
            let ranker = TabularRanker::new(RankerModel::TreeEnsemble {
                base_score: 0.0,
                trees: vec![RegressionTree { nodes }],
                sigmoid: false,
            });
            let result = ranker.predict(&[0.5, 10.0, 4.0, 0.6]);
            assert_eq!(result.is_err(), idx < 3, "tree {idx}");
        }

        let looping = TabularRanker::new(RankerModel::TreeEnsemble {
            base_score: 0.0,
            trees: vec![RegressionTree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 0,
                }],
            }],
            sigmoid: false,
        });
        assert!(looping.predict(&[0.5, 10.0, 4.0, 0.6]).is_err());
    }

    #[test]
    fn test_load_missing_artifact() {
        let err = TabularRanker::load(Path::new("/nonexistent/ranker.json")).unwrap_err();
        assert!(err.is_absent_artifact());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{TREE_JSON}").unwrap();
        let ranker = TabularRanker::load(file.path()).unwrap();
        assert_eq!(ranker.name(), "tree-ensemble");
    }
}
