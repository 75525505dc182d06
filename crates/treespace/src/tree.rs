use std::fmt;

use crate::error::PhyloError;
use crate::split::Split;

/// A weighted phylogenetic tree: an ordered list of pairwise-compatible
/// splits over one leaf universe, each carrying a non-negative edge length.
///
/// Insertion order is meaningful: it defines the coordinate order of the
/// tree within its orthant of BHV space. A tree with no splits is the star
/// tree, the origin of the orthant. Trees grow monotonically through
/// [`Tree::add_split`] and are treated as read-only by the projection
/// operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    leaf_count: usize,
    splits: Vec<Split>,
    weights: Vec<f64>,
}

impl Tree {
    /// The star tree over `{0, .., leaf_count}`.
    pub fn new(leaf_count: usize) -> Self {
        Self {
            leaf_count,
            splits: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Appends a split and its edge length as the next coordinate.
    ///
    /// The split must share the tree's leaf universe and be compatible with
    /// every split already present. The append is atomic: on error the tree
    /// is left unchanged.
    pub fn add_split(&mut self, split: Split, weight: f64) -> Result<(), PhyloError> {
        if split.leaf_count() != self.leaf_count {
            return Err(PhyloError::LeafCountMismatch {
                expected: self.leaf_count,
                actual: split.leaf_count(),
            });
        }
        if weight < 0.0 {
            return Err(PhyloError::NegativeWeight { weight });
        }
        if let Some(existing) = self.splits.iter().find(|s| !s.nested_or_disjoint(&split)) {
            let existing = existing.clone();
            return Err(PhyloError::IncompatibleSplit { split, existing });
        }
        self.splits.push(split);
        self.weights.push(weight);
        Ok(())
    }

    /// Convenience form of [`Tree::add_split`] taking one side of the
    /// bipartition as raw leaf labels.
    pub fn add_split_side(&mut self, side: &[usize], weight: f64) -> Result<(), PhyloError> {
        let split = Split::new(side, self.leaf_count)?;
        self.add_split(split, weight)
    }

    /// Number of leaves beyond the distinguished leaf 0.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Splits in insertion order.
    #[inline]
    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// Edge lengths, parallel to [`Tree::splits`].
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of coordinates (splits) of the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Whether this is the star tree.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Whether the tree carries a coordinate equal to `split`.
    pub fn contains(&self, split: &Split) -> bool {
        self.splits.contains(split)
    }

    /// Edge length of the first coordinate equal to `split`, if present.
    pub fn weight_of(&self, split: &Split) -> Option<f64> {
        self.splits
            .iter()
            .position(|s| s == split)
            .map(|index| self.weights[index])
    }

    /// Iterates `(split, weight)` coordinates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Split, f64)> + '_ {
        self.splits.iter().zip(self.weights.iter().copied())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree on {} leaves", self.leaf_count + 1)?;
        for (split, weight) in self.iter() {
            write!(f, "\n  {split}  (length {weight})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_coordinates_in_insertion_order() {
        let mut tree = Tree::new(7);
        tree.add_split_side(&[1, 2, 3], 1.0).unwrap();
        tree.add_split_side(&[4, 5, 6], 2.0).unwrap();
        tree.add_split_side(&[4, 5], 0.5).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.weights(), &[1.0, 2.0, 0.5]);
        assert_eq!(tree.splits()[0], Split::new(&[1, 2, 3], 7).unwrap());
        assert_eq!(tree.splits()[2], Split::new(&[4, 5], 7).unwrap());
    }

    #[test]
    fn incompatible_split_is_rejected_without_partial_append() {
        let mut tree = Tree::new(7);
        tree.add_split_side(&[1, 2], 1.0).unwrap();
        let err = tree.add_split_side(&[2, 3], 1.0).unwrap_err();
        assert!(matches!(err, PhyloError::IncompatibleSplit { .. }));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.weights(), &[1.0]);
    }

    #[test]
    fn splits_from_another_universe_are_rejected() {
        let mut tree = Tree::new(7);
        let foreign = Split::new(&[1, 2], 5).unwrap();
        assert!(matches!(
            tree.add_split(foreign, 1.0),
            Err(PhyloError::LeafCountMismatch {
                expected: 7,
                actual: 5
            })
        ));
        assert!(tree.is_empty());
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut tree = Tree::new(7);
        assert!(matches!(
            tree.add_split_side(&[1, 2], -0.25),
            Err(PhyloError::NegativeWeight { .. })
        ));
        assert!(tree.is_empty());
    }

    #[test]
    fn weight_lookup_matches_first_occurrence() {
        let mut tree = Tree::new(7);
        tree.add_split_side(&[1, 2, 3], 1.5).unwrap();
        let split = Split::new(&[0, 4, 5, 6, 7], 7).unwrap();
        assert!(tree.contains(&split));
        assert_eq!(tree.weight_of(&split), Some(1.5));
        assert_eq!(tree.weight_of(&Split::new(&[4, 5], 7).unwrap()), None);
    }
}
