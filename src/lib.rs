//! Phylogroups partitions a rooted, weighted phylogenetic tree into a
//! hierarchy of contiguous sub-trees ("clusters") using a single
//! edge-length cutoff.
//!
//! Every edge strictly longer than the cutoff is a boundary. The regions
//! between boundaries become clusters, arranged in a hierarchy that records
//! where each cluster hangs from its parent in the original tree.
//! Two artifacts are derived from the hierarchy:
//! - a profile tree: one vertex per cluster, branch lengths are the
//!   boundary-edge lengths (Newick)
//! - a membership listing: for each cluster, the names of the original
//!   vertices it owns
//!
//! Core functionality provided:
//! - Newick: Parse a single tree of arbitrary arity with leaf and internal
//!   names, and write trees back. See [crate::newick].
//! - Tree model: [PhyloTree], arena based; vertices are referenced by
//!   index only. See [crate::model].
//! - Clustering: [ClusterBuilder], [ClusterTree], membership and profile
//!   synthesis. See [crate::cluster].
//! - Pipeline: [pipeline::run] reads a tree file and writes both artifacts,
//!   all or nothing.
//!
//! # Example
//! ```
//! use phylogroups::cluster::{member_names, synthesize_profile};
//! use phylogroups::newick::NewickStyle;
//! use phylogroups::{ClusterBuilder, parse_newick_str};
//!
//! let tree = parse_newick_str("((A:1,B:1):3,(C:1,(D:1,E:1):0.5):2):0;")?;
//! let clusters = ClusterBuilder::new(2.0).build(&tree)?;
//!
//! let profile = synthesize_profile(&clusters);
//! assert_eq!(profile.to_newick(NewickStyle::AllNames), "(Cluster_1:3)Cluster_0:0;");
//! assert_eq!(member_names(&clusters, 1), vec!["A", "B"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cluster;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;

pub use crate::cluster::{ClusterBuilder, ClusterNode, ClusterTree, LinkBridge};
pub use crate::error::{Error, Result};
pub use crate::model::PhyloTree;

use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [PhyloTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> std::result::Result<PhyloTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file holding one Newick tree using default settings,
/// returning a [PhyloTree].
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> std::result::Result<PhyloTree, ParsingError> {
    newick::parse_file(path)
}

// ============================================================================
// Quick Clustering API
// ============================================================================
/// Clusters `tree` with the given cutoff using default settings.
///
/// See [`ClusterBuilder::build`] for details and errors.
pub fn cluster_tree(tree: &PhyloTree, cutoff: f64) -> Result<ClusterTree<'_>> {
    ClusterBuilder::new(cutoff).build(tree)
}
