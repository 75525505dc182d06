use thiserror::Error;

use crate::split::Split;

/// Errors raised by split construction and tree operations.
#[derive(Debug, Error)]
pub enum PhyloError {
    /// The given labels do not describe a proper bipartition of the leaf set.
    #[error("split side must be a non-empty proper subset of the leaves 0..={leaf_count}")]
    InvalidSplit { leaf_count: usize },
    /// The split cannot coexist with a split already present in the tree.
    #[error("split {split} is incompatible with existing split {existing}")]
    IncompatibleSplit { split: Split, existing: Split },
    /// Operation mixed trees or splits over different leaf universes.
    #[error("leaf count mismatch: expected {expected}, got {actual}")]
    LeafCountMismatch { expected: usize, actual: usize },
    /// Edge lengths are coordinates of an orthant and cannot be negative.
    #[error("edge weight must be non-negative, got {weight}")]
    NegativeWeight { weight: f64 },
}
