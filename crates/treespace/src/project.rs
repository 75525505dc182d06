//! Projection of trees onto the boundary stratum of a reference topology.
//!
//! A reference tree induces a boundary stratum of BHV space spanned by its
//! surviving splits: the splits left after removing every split that is
//! strictly nested with another one of the reference. Input trees are
//! re-expressed on that stratum by keeping their own compatible splits and
//! appending the stratum's splits.

use ndarray::Array2;
use tracing::{debug, trace};

use crate::error::PhyloError;
use crate::split::Split;
use crate::tree::Tree;

/// Pair count from which the batch projector fans out across rayon.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 64;

/// Splits of `tree` that span its boundary stratum.
///
/// A split survives iff it is not strictly nested with any other split of
/// the tree, in either direction: when one canonical part strictly contains
/// another, both edges describe refinements of a shared subtree and neither
/// is kept as a stratum axis. Survivors keep their relative order in the
/// tree. A star tree yields no survivors.
pub fn surviving_splits(tree: &Tree) -> Vec<Split> {
    let splits = tree.splits();
    let survivors: Vec<Split> = splits
        .iter()
        .enumerate()
        .filter(|&(i, split)| {
            splits.iter().enumerate().all(|(j, other)| {
                i == j
                    || !(split.is_strict_subset_of(other) || other.is_strict_subset_of(split))
            })
        })
        .map(|(_, split)| split.clone())
        .collect();
    trace!(
        total = splits.len(),
        surviving = survivors.len(),
        "selected surviving splits"
    );
    survivors
}

/// Selection matrix from the ambient coordinate space of `tree` onto the
/// coordinates retained by its surviving splits.
///
/// The ambient space has one axis per leaf position `0..=leaf_count`. Every
/// non-surviving split, taken in tree order, removes one axis: the smallest
/// label of its canonical part not removed by an earlier non-surviving
/// split. The result is the identity over the ambient space with those
/// columns deleted, a 0/1 selection matrix with exactly one 1 per retained
/// column, so applying its transpose to an ambient vector yields the
/// surviving sub-vector in original order.
pub fn projection_matrix(tree: &Tree) -> Array2<f64> {
    let dim = tree.leaf_count() + 1;
    let surviving = surviving_splits(tree);

    let mut dropped: Vec<usize> = Vec::new();
    for split in tree.splits() {
        if surviving.contains(split) {
            continue;
        }
        let axis = split
            .part()
            .iter()
            .copied()
            .find(|label| !dropped.contains(label));
        if let Some(axis) = axis {
            dropped.push(axis);
        }
    }

    let kept: Vec<usize> = (0..dim).filter(|axis| !dropped.contains(axis)).collect();
    let mut matrix = Array2::zeros((dim, kept.len()));
    for (column, &axis) in kept.iter().enumerate() {
        matrix[[axis, column]] = 1.0;
    }
    matrix
}

/// Projects `input` onto the boundary stratum spanned by `surviving`, the
/// surviving splits of `reference`.
///
/// Splits of the input compatible with every surviving split are kept
/// verbatim, in their original order and with their original weights; the
/// surviving splits not already present by split-equality are then appended
/// with their weight in the reference. Neither argument is mutated; a fresh
/// tree on the stratum is returned.
pub fn project_tree(
    reference: &Tree,
    input: &Tree,
    surviving: &[Split],
) -> Result<Tree, PhyloError> {
    let leaf_count = reference.leaf_count();
    if input.leaf_count() != leaf_count {
        return Err(PhyloError::LeafCountMismatch {
            expected: leaf_count,
            actual: input.leaf_count(),
        });
    }
    if let Some(split) = surviving.iter().find(|s| s.leaf_count() != leaf_count) {
        return Err(PhyloError::LeafCountMismatch {
            expected: leaf_count,
            actual: split.leaf_count(),
        });
    }

    let mut projected = Tree::new(leaf_count);
    for (split, weight) in input.iter() {
        if surviving.iter().all(|s| split.nested_or_disjoint(s)) {
            projected.add_split(split.clone(), weight)?;
        }
    }
    for split in surviving {
        if !projected.contains(split) {
            let weight = reference.weight_of(split).unwrap_or(0.0);
            projected.add_split(split.clone(), weight)?;
        }
    }
    Ok(projected)
}

/// Projects every input tree under every reference tree.
///
/// Group `g` of the output holds, in input order, the projections under the
/// surviving splits of `references[g]`; groups follow reference order. Each
/// reference's surviving splits are computed once. Per-pair projections are
/// independent, and with the `parallel` feature enabled, batches of at
/// least [`PARALLEL_THRESHOLD`] pairs fan out across rayon with identical
/// results. The first failing pair aborts the whole batch.
pub fn proj_trees(references: &[Tree], inputs: &[Tree]) -> Result<Vec<Vec<Tree>>, PhyloError> {
    debug!(
        references = references.len(),
        inputs = inputs.len(),
        "projecting tree batch"
    );

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if references.len() * inputs.len() >= PARALLEL_THRESHOLD {
            return references
                .par_iter()
                .map(|reference| {
                    let surviving = surviving_splits(reference);
                    inputs
                        .par_iter()
                        .map(|input| project_tree(reference, input, &surviving))
                        .collect()
                })
                .collect();
        }
    }

    references
        .iter()
        .map(|reference| {
            let surviving = surviving_splits(reference);
            inputs
                .iter()
                .map(|input| project_tree(reference, input, &surviving))
                .collect()
        })
        .collect()
}

/// Single-reference form of [`proj_trees`]: one projected tree per input,
/// in input order.
pub fn proj_trees_single(reference: &Tree, inputs: &[Tree]) -> Result<Vec<Tree>, PhyloError> {
    let surviving = surviving_splits(reference);
    inputs
        .iter()
        .map(|input| project_tree(reference, input, &surviving))
        .collect()
}
