//! Trait for constructing phylogenetic trees bottom-up.
//!
//! The [`TreeBuilder`] trait decouples producers of tree structure from
//! concrete tree representations. The Newick parser calls builder methods as
//! it reads a Newick string, and the profile synthesizer calls them as it
//! walks a cluster hierarchy; the builder assembles whatever tree structure
//! it wants.
//!
//! # Built-in implementations
//! * [`PhyloTreeBuilder`] - Builds a [`PhyloTree`]
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_* ──→ finish_tree() ──→ Empty
//!   ↑                                                                  │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
// Imports for doc links
#[allow(unused_imports)]
use crate::model::{PhyloTree, PhyloTreeBuilder};

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================T=
/// Abstraction for constructing trees bottom-up.
///
/// Producers call its methods children-first: every index passed in
/// `children` was returned by an earlier `add_*` call on the same tree.
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal),
///    [`add_root`](Self::add_root) -> build structure
/// 3. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
///
/// After `finish_tree`, the builder returns to an empty state,
/// ready for `init_next` again.
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_vertices` - Expected number of vertices (hint for allocation)
    fn init_next(&mut self, num_vertices: usize);

    /// Adds a leaf vertex to the tree under construction.
    ///
    /// # Arguments
    /// * `name` - Label of the leaf, may be empty
    /// * `branch_len` - Branch length to parent, if specified (non-negative)
    fn add_leaf(&mut self, name: String, branch_len: Option<f64>) -> Self::VertexIdx;

    /// Adds an internal (non-root) vertex with the given children.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, in order
    /// * `name` - Label of the vertex, may be empty
    /// * `branch_len` - Branch length to parent, if specified (non-negative)
    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        name: String,
        branch_len: Option<f64>,
    ) -> Self::VertexIdx;

    /// Adds the root vertex, completing the tree structure.
    ///
    /// `children` may be empty for a single-vertex tree.
    ///
    /// # Arguments
    /// * `children` - Indices of the root's child vertices, in order
    /// * `name` - Label of the root, may be empty
    /// * `branch_len` - Root branch length (rare, but allowed in Newick)
    fn add_root(
        &mut self,
        children: Vec<Self::VertexIdx>,
        name: String,
        branch_len: Option<f64>,
    ) -> Self::VertexIdx;

    /// Finalizes the building process and returns the resulting tree,
    /// or `None` if no tree was initialized.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}
