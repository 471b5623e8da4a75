//! Provides the phylogenetic tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [PhyloTree] - Main tree structure using the arena pattern
//!   for efficient memory layout, with vertices of arbitrary arity.
//! * [VertexIndex] as type used to index vertices in tree

use crate::model::vertex::{BranchLength, Vertex};
use crate::newick;
use crate::newick::NewickStyle;
use std::collections::HashMap;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
/// Vertex identity is its index; names may be empty or repeat.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
/// - Vertices may have any number of children, kept in input order.
/// - Branch lengths are optional, but if provided must be non-negative.
///
/// # Construction
/// Add vertices bottom-up: leaves first, then internal vertices referencing
/// their children, and finally the root.
/// Test validity with [`PhyloTree::is_valid()`].
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `name` - Label of this leaf, may be empty
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    pub fn add_leaf(&mut self, name: String, branch_length: Option<BranchLength>) -> VertexIndex {
        self.push_vertex(Vec::new(), name, branch_length)
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices, in order; their parent is set to the new vertex
    /// * `name` - Label of this vertex, may be empty
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        name: String,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        self.push_vertex(children, name, branch_length)
    }

    /// Adds the root to the tree, assigning a unique index, which gets returned.
    ///
    /// The root may have no children, yielding a single-vertex tree.
    ///
    /// # Arguments
    /// * `children` - Child indices, in order
    /// * `name` - Label of the root, may be empty
    /// * `branch_length` - Optional length of incoming edge (rare, but allowed in Newick)
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        name: String,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.push_vertex(children, name, branch_length);
        self.root_index = index;
        index
    }

    fn push_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        name: String,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        let child_indices = children.clone();
        self.vertices
            .push(Vertex::new(index, children, branch_length, name));
        for child in child_indices {
            self[child].set_parent(index);
        }
        index
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns all vertices in arena order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the distance of the given vertex to its parent,
    /// treating a missing branch length as `0.0`.
    pub fn distance_to_parent(&self, index: VertexIndex) -> f64 {
        self[index].distance_to_parent()
    }

    /// Returns the sum of all branch lengths in the tree.
    pub fn total_branch_length(&self) -> f64 {
        self.vertices
            .iter()
            .filter_map(|v| v.branch_length())
            .map(|bl| *bl)
            .sum::<f64>()
    }

    /// Checks if all non-root vertices have branch lengths set.
    pub fn vertices_have_branch_lengths(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.index() == self.root_index || v.has_branch_length())
    }

    /// Returns the path distance between two vertices, that is, the sum of
    /// branch lengths on the path via their lowest common ancestor.
    ///
    /// Missing branch lengths count as `0.0`.
    ///
    /// # Returns
    /// `None` if the vertices share no ancestor (only possible for
    /// malformed trees).
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    pub fn path_distance(&self, a: VertexIndex, b: VertexIndex) -> Option<f64> {
        // Distance from `a` up to each of its ancestors (including itself)
        let mut up_from_a: HashMap<VertexIndex, f64> = HashMap::new();
        let mut current = a;
        let mut distance = 0.0;
        for _ in 0..=self.vertices.len() {
            up_from_a.insert(current, distance);
            match self[current].parent() {
                Some(parent) => {
                    distance += self.distance_to_parent(current);
                    current = parent;
                }
                None => break,
            }
        }

        // Walk up from `b` until hitting an ancestor of `a`
        let mut current = b;
        let mut distance = 0.0;
        for _ in 0..=self.vertices.len() {
            if let Some(&from_a) = up_from_a.get(&current) {
                return Some(from_a + distance);
            }
            distance += self.distance_to_parent(current);
            current = self[current].parent()?;
        }

        None
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All non-root vertices have a parent listing them as child
    /// - Every vertex is reached exactly once from the root (no cycles,
    ///   no shared children, no detached vertices)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.vertices.len() {
            return false;
        }
        if self.root().has_parent() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            if index != self.root_index {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        // Reachability: each vertex exactly once
        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![self.root_index];
        let mut num_seen = 0;
        while let Some(index) = stack.pop() {
            if seen[index] {
                return false;
            }
            seen[index] = true;
            num_seen += 1;
            stack.extend(self.vertices[index].children().iter().copied());
        }

        num_seen == self.vertices.len()
    }

    /// Convenience method to convert this tree to a Newick string.
    pub fn to_newick(&self, style: NewickStyle) -> String {
        newick::to_newick(self, style)
    }
}

impl Default for PhyloTree {
    /// Same as [PhyloTree::new]: empty, with no root set.
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for PhyloTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the vertex itself.
    /// This is useful for aggregating data from leaves upward, etc.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each vertex before visiting its children,
    /// siblings in their stored order.
    ///
    /// # Example
    /// ```
    /// use phylogroups::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A:1,B:1)AB:2,C:3)R;").unwrap();
    /// let names: Vec<_> = tree.pre_order_iter().map(|v| v.name()).collect();
    /// assert_eq!(names, vec!["R", "AB", "A", "B", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children last-first, so first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
