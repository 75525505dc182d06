//! Projections onto boundary strata of Billera-Holmes-Vogtmann (BHV)
//! phylogenetic tree space.
//!
//! A point of BHV space is a weighted phylogenetic tree: an ordered set of
//! splits (bipartitions) of a fixed leaf set, each carrying a non-negative
//! edge length. Given a reference tree, this crate selects the splits that
//! span the reference's boundary stratum, builds the 0/1 selection matrix
//! onto that stratum, and re-expresses input trees in the reference's split
//! system, so that tree populations living in different orthants of the
//! tree-space complex can be compared in one coordinate system.

pub mod error;
pub mod project;
pub mod split;
pub mod tree;

pub use error::PhyloError;
pub use project::{
    proj_trees, proj_trees_single, project_tree, projection_matrix, surviving_splits,
};
pub use split::Split;
pub use tree::Tree;
