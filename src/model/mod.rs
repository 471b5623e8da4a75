//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Vertices may have any number
//! of children, and both leaves and internal vertices may carry a name.
//!
//! # Building trees
//! Trees are typically constructed via the [TreeBuilder] trait, which
//! decouples producers (the Newick parser, the profile synthesizer) from
//! concrete tree types:
//!
//! - [PhyloTreeBuilder] → [PhyloTree]

pub mod phylo_tree_builder;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use phylo_tree_builder::PhyloTreeBuilder;
pub use tree::PhyloTree;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use vertex::{BranchLength, Vertex};
