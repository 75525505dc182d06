use std::fmt;

use crate::error::PhyloError;

/// A bipartition of the leaf set `{0, .., leaf_count}` of a phylogenetic
/// tree, corresponding to one interior edge.
///
/// The split is stored canonically as the side of the bipartition that does
/// not contain leaf 0, sorted ascending, so that a split built from either
/// side of the same bipartition compares equal. Splits are immutable value
/// objects with no identity beyond their bipartition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Split {
    part: Vec<usize>,
    leaf_count: usize,
}

impl Split {
    /// Builds a split from one side of a bipartition of `{0, .., leaf_count}`.
    ///
    /// Either side may be given; the canonical side kept is the one without
    /// leaf 0. Duplicate labels collapse. Fails if the side is empty, covers
    /// the whole leaf set, or mentions a label outside the universe.
    pub fn new(side: &[usize], leaf_count: usize) -> Result<Self, PhyloError> {
        let mut part: Vec<usize> = side.to_vec();
        part.sort_unstable();
        part.dedup();
        if part.is_empty() || part.len() == leaf_count + 1 {
            return Err(PhyloError::InvalidSplit { leaf_count });
        }
        if part.iter().any(|&label| label > leaf_count) {
            return Err(PhyloError::InvalidSplit { leaf_count });
        }
        if part[0] == 0 {
            part = (1..=leaf_count).filter(|label| !part.contains(label)).collect();
        }
        Ok(Self { part, leaf_count })
    }

    /// The canonical side of the bipartition (the side without leaf 0),
    /// sorted ascending.
    #[inline]
    pub fn part(&self) -> &[usize] {
        &self.part
    }

    /// Number of leaves beyond the distinguished leaf 0; the universe is
    /// `{0, .., leaf_count}`.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Tests whether the two splits can coexist in one tree topology: their
    /// canonical parts must be nested or disjoint.
    pub fn is_compatible(&self, other: &Split) -> Result<bool, PhyloError> {
        if self.leaf_count != other.leaf_count {
            return Err(PhyloError::LeafCountMismatch {
                expected: self.leaf_count,
                actual: other.leaf_count,
            });
        }
        Ok(self.nested_or_disjoint(other))
    }

    /// Compatibility over a shared leaf universe.
    pub(crate) fn nested_or_disjoint(&self, other: &Split) -> bool {
        self.is_subset_of(other) || other.is_subset_of(self) || self.is_disjoint_from(other)
    }

    pub(crate) fn is_strict_subset_of(&self, other: &Split) -> bool {
        self.part.len() < other.part.len() && self.is_subset_of(other)
    }

    fn is_subset_of(&self, other: &Split) -> bool {
        self.part.iter().all(|label| other.part.contains(label))
    }

    fn is_disjoint_from(&self, other: &Split) -> bool {
        self.part.iter().all(|label| !other.part.contains(label))
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, label) in self.part.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{label}")?;
        }
        write!(f, "}}|{{")?;
        let mut first = true;
        for label in 0..=self.leaf_count {
            if !self.part.contains(&label) {
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{label}")?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}
