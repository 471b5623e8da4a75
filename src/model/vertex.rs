//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree of arbitrary arity.
///
/// Whether a vertex is the root, an internal vertex or a leaf is derived
/// from its links:
/// - **Root**: has no parent (may still be a leaf for a single-vertex tree)
/// - **Internal**: has a parent and at least one child
/// - **Leaf**: has no children
///
/// # Invariants
/// - `index` is index in arena
/// - `branch_length` is non-negative and finite (enforced); might not be set
/// - `parent` is `None` only for the root and during construction
/// - `children` keep the order in which they were given
/// - `name` may be empty; names are not identities and may repeat
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex, if any
    parent: Option<VertexIndex>,
    /// Indices of the child vertices, in input order
    children: Vec<VertexIndex>,
    /// Distance to parent vertex (optional, non-negative if present)
    branch_length: Option<BranchLength>,
    /// Leaf or internal label, possibly empty
    name: String,
}

impl Vertex {
    /// Creates a new vertex without parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices, in order
    /// * `branch_length` - Distance to parent vertex
    /// * `name` - Label of this vertex, may be empty
    pub fn new(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        name: String,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            branch_length,
            name,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the name of this vertex (empty if unnamed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this vertex carries a non-empty name.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the branch length to the parent, if specified.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the branch length to the parent, treating a missing length as `0.0`.
    pub fn distance_to_parent(&self) -> f64 {
        self.branch_length.map_or(0.0, |bl| *bl)
    }

    /// Returns the child indices in order (empty for a leaf).
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has a parent and children.
    pub fn is_internal(&self) -> bool {
        self.parent.is_some() && !self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    ///
    /// Note that during construction vertices are parentless until
    /// attached, so use [PhyloTree::root_index](crate::model::PhyloTree::root_index)
    /// to identify the root of a finished tree.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Sets new parent for this vertex.
    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl std::fmt::Display for BranchLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
