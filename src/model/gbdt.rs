//! Gradient-boosted tree forest: loading and per-row evaluation.
//!
//! The serialized form is a JSON forest (see `data/model.json`): a flat
//! node array per tree, split nodes referencing children by index, leaf
//! nodes carrying an additive margin. With `n_classes` classes, tree `i`
//! contributes its leaf value to class `i % n_classes` on top of a shared
//! base score; the prediction is the argmax class index.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GbdtError {
    #[error("model file not found: {0}")]
    FileNotFound(String),

    #[error("invalid model format: {0}")]
    InvalidFormat(String),

    #[error("tree {tree}, node {node}: child index {child} out of range")]
    ChildOutOfRange { tree: usize, node: usize, child: usize },

    #[error("split references feature index {feature}, but the row has {row_len} columns")]
    FeatureOutOfRange { feature: usize, row_len: usize },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One node of a decision tree: either an internal split or a leaf margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        /// Column index into the encoded feature row.
        feature: usize,
        /// Rows with `row[feature] < threshold` descend left.
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single decision tree, nodes stored in a flat array rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for one row and return the reached leaf's value.
    ///
    /// Bounded by the node count so a cyclic node graph fails instead of
    /// spinning a request handler.
    fn evaluate(&self, row: &[f64]) -> Result<f64, GbdtError> {
        let mut index = 0;
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                GbdtError::InvalidFormat(format!("node index {index} out of range"))
            })?;
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value =
                        row.get(*feature)
                            .copied()
                            .ok_or(GbdtError::FeatureOutOfRange {
                                feature: *feature,
                                row_len: row.len(),
                            })?;
                    index = if value < *threshold { *left } else { *right };
                }
            }
        }
        Err(GbdtError::InvalidFormat(
            "tree walk did not reach a leaf".to_string(),
        ))
    }
}

/// A loaded gradient-boosted tree classifier. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtClassifier {
    /// Number of output classes.
    pub n_classes: usize,

    /// Margin added to every class before tree contributions.
    pub base_score: f64,

    /// Boosted trees, round-robin over classes.
    pub trees: Vec<Tree>,
}

impl GbdtClassifier {
    /// Load and structurally validate a serialized forest.
    pub fn load(path: &Path) -> Result<Self, GbdtError> {
        if !path.exists() {
            return Err(GbdtError::FileNotFound(path.display().to_string()));
        }

        let data = std::fs::read_to_string(path)?;
        let model: GbdtClassifier = serde_json::from_str(&data)
            .map_err(|e| GbdtError::InvalidFormat(e.to_string()))?;
        model.validate()?;

        info!(
            n_classes = model.n_classes,
            trees = model.trees.len(),
            "Loaded model"
        );

        Ok(model)
    }

    /// Check structural invariants: at least two classes, at least one tree,
    /// non-empty trees, and every child index in range.
    fn validate(&self) -> Result<(), GbdtError> {
        if self.n_classes < 2 {
            return Err(GbdtError::InvalidFormat(format!(
                "n_classes must be at least 2, got {}",
                self.n_classes
            )));
        }
        if self.trees.is_empty() {
            return Err(GbdtError::InvalidFormat("model has no trees".to_string()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(GbdtError::InvalidFormat(format!("tree {t} has no nodes")));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split { left, right, .. } = node {
                    for child in [*left, *right] {
                        if child >= tree.nodes.len() {
                            return Err(GbdtError::ChildOutOfRange {
                                tree: t,
                                node: n,
                                child,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Per-class margins for one encoded row.
    pub fn predict_margins(&self, row: &[f64]) -> Result<Vec<f64>, GbdtError> {
        let mut margins = vec![self.base_score; self.n_classes];
        for (i, tree) in self.trees.iter().enumerate() {
            margins[i % self.n_classes] += tree.evaluate(row)?;
        }
        Ok(margins)
    }

    /// Predicted class index (argmax over margins) for one encoded row.
    pub fn predict(&self, row: &[f64]) -> Result<usize, GbdtError> {
        let margins = self.predict_margins(row)?;
        let (best, _) = margins
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            });
        Ok(best)
    }
}
