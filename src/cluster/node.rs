//! Cluster hierarchy: [ClusterNode]s in an arena, linked by [LinkBridge]s.
//!
//! Each bridge is stored once, on the child side: a child cluster records
//! its parent cluster and the original-tree vertex it hangs from (its
//! attachment). The parent only keeps the ordered list of child indices.
//! Bridge values seen from either side are derived on demand.

use crate::cluster::membership;
use crate::model::{PhyloTree, VertexIndex};

/// Index of a cluster in a [ClusterTree] (arena), in creation order.
pub type ClusterIndex = usize;

// =#========================================================================#=
// LINK BRIDGE
// =#========================================================================#=
/// Where one cluster attaches to another within the original tree.
///
/// Pairs an original-tree vertex (the anchor on this side of the link)
/// with the cluster on the other side, or `None` for the parent side
/// of the hierarchy root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkBridge {
    attachment: VertexIndex,
    cluster: Option<ClusterIndex>,
}

impl LinkBridge {
    /// Returns the original-tree vertex anchoring this link.
    pub fn attachment(&self) -> VertexIndex {
        self.attachment
    }

    /// Returns the cluster on the other side, `None` above the hierarchy root.
    pub fn cluster(&self) -> Option<ClusterIndex> {
        self.cluster
    }
}

// =#========================================================================#=
// CLUSTER NODE
// =#========================================================================#=
/// A contiguous region of the original tree treated as one unit.
///
/// # Invariants
/// - `base_node` is the topmost original-tree vertex of the owned region
/// - for non-root clusters, `attachment` is the original-tree parent of
///   `base_node` and `distance` the length of the edge between them
/// - the root cluster has no parent, no attachment and distance `0.0`
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterNode {
    index: ClusterIndex,
    name: String,
    distance: f64,
    base_node: VertexIndex,
    attachment: Option<VertexIndex>,
    parent: Option<ClusterIndex>,
    children: Vec<ClusterIndex>,
}

impl ClusterNode {
    /// Returns the index of this cluster.
    pub fn index(&self) -> ClusterIndex {
        self.index
    }

    /// Returns the unique name of this cluster, e.g. `Cluster_3`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the length of the boundary edge separating this cluster
    /// from its parent cluster (`0.0` for the root).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the original-tree vertex at the top of this cluster.
    pub fn base_node(&self) -> VertexIndex {
        self.base_node
    }

    /// Returns the original-tree parent of [base_node](Self::base_node),
    /// `None` for the root cluster.
    pub fn attachment(&self) -> Option<VertexIndex> {
        self.attachment
    }

    /// Returns the parent cluster, `None` for the root.
    pub fn parent(&self) -> Option<ClusterIndex> {
        self.parent
    }

    /// Returns the child clusters in discovery order.
    pub fn children(&self) -> &[ClusterIndex] {
        &self.children
    }

    /// Returns `true` if this cluster has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// =$========================================================================$=
// CLUSTER TREE
// =$========================================================================$=
/// Hierarchy of [ClusterNode]s over a borrowed [PhyloTree].
///
/// Created by [ClusterBuilder](crate::cluster::ClusterBuilder); write-once.
/// The root cluster has index `0`; clusters are indexed in creation order.
#[derive(Debug, Clone)]
pub struct ClusterTree<'t> {
    tree: &'t PhyloTree,
    cutoff: f64,
    clusters: Vec<ClusterNode>,
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl<'t> ClusterTree<'t> {
    /// Creates a hierarchy holding only the root cluster, based at the
    /// root of `tree`.
    pub(crate) fn with_root(tree: &'t PhyloTree, cutoff: f64, name: String) -> Self {
        let root = ClusterNode {
            index: 0,
            name,
            distance: 0.0,
            base_node: tree.root_index(),
            attachment: None,
            parent: None,
            children: Vec::new(),
        };
        ClusterTree {
            tree,
            cutoff,
            clusters: vec![root],
        }
    }

    /// Adds a child cluster below `parent`, based at `base_node`, which
    /// hangs from `attachment` in the original tree.
    pub(crate) fn add_child(
        &mut self,
        parent: ClusterIndex,
        attachment: VertexIndex,
        base_node: VertexIndex,
        name: String,
    ) -> ClusterIndex {
        let index = self.clusters.len();
        self.clusters.push(ClusterNode {
            index,
            name,
            distance: self.tree.distance_to_parent(base_node),
            base_node,
            attachment: Some(attachment),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.clusters[parent].children.push(index);
        index
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl<'t> ClusterTree<'t> {
    /// Returns the original tree this hierarchy partitions.
    pub fn original_tree(&self) -> &'t PhyloTree {
        self.tree
    }

    /// Returns the cutoff used to build this hierarchy.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Returns the number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Always `false`: a hierarchy has at least its root cluster.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Returns the root cluster.
    pub fn root(&self) -> &ClusterNode {
        &self.clusters[0]
    }

    /// Returns all clusters in creation order.
    pub fn clusters(&self) -> &[ClusterNode] {
        &self.clusters
    }

    /// Returns the cluster at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn cluster(&self, index: ClusterIndex) -> &ClusterNode {
        &self.clusters[index]
    }

    /// Returns the cluster with the given name, if any.
    pub fn cluster_by_name(&self, name: &str) -> Option<&ClusterNode> {
        self.clusters.iter().find(|c| c.name == name)
    }

    /// Returns the number of boundary edges, that is, of non-root clusters.
    pub fn num_boundaries(&self) -> usize {
        self.clusters.len() - 1
    }

    /// Returns the original-tree vertices owned by the given cluster.
    ///
    /// See [owned_region](crate::cluster::owned_region).
    pub fn owned_region(&self, index: ClusterIndex) -> Vec<VertexIndex> {
        membership::owned_region(self, index)
    }
}

impl std::ops::Index<ClusterIndex> for ClusterTree<'_> {
    type Output = ClusterNode;

    fn index(&self, index: ClusterIndex) -> &Self::Output {
        &self.clusters[index]
    }
}

// ============================================================================
// Link-bridge navigation (pub)
// ============================================================================
impl ClusterTree<'_> {
    /// Returns the child clusters of `x`, in discovery order.
    pub fn children(&self, x: ClusterIndex) -> &[ClusterIndex] {
        self[x].children()
    }

    /// Returns the parent cluster of `x`, or `None` for the root.
    pub fn parent(&self, x: ClusterIndex) -> Option<ClusterIndex> {
        self[x].parent()
    }

    /// Returns `true` iff `x` has no parent.
    pub fn is_root(&self, x: ClusterIndex) -> bool {
        self[x].is_root()
    }

    /// Returns the bridge of `x` towards its parent:
    /// its own base node paired with the parent cluster.
    pub fn parent_bridge(&self, x: ClusterIndex) -> LinkBridge {
        let cluster = &self[x];
        LinkBridge {
            attachment: cluster.base_node,
            cluster: cluster.parent,
        }
    }

    /// Returns the bridges of `x` towards its children: each child's
    /// attachment vertex paired with the child, in discovery order.
    pub fn children_bridges(&self, x: ClusterIndex) -> Vec<LinkBridge> {
        self[x]
            .children
            .iter()
            .map(|&child| self.child_bridge(child))
            .collect()
    }

    /// Returns `true` iff `y` is the parent or a child of `x`.
    pub fn is_directly_linked(&self, x: ClusterIndex, y: ClusterIndex) -> bool {
        self.parent(x) == Some(y) || self.children(x).contains(&y)
    }

    /// Returns the bridge of `x` connecting it to `y`,
    /// or `None` if they are not directly linked.
    pub fn bridge_to(&self, x: ClusterIndex, y: ClusterIndex) -> Option<LinkBridge> {
        if self.children(x).contains(&y) {
            Some(self.child_bridge(y))
        } else if self.parent(x) == Some(y) {
            Some(self.parent_bridge(x))
        } else {
            None
        }
    }

    /// Returns the original-tree anchors of the link between `x` and `y`,
    /// as seen from `x` and as seen from `y`.
    ///
    /// For a parent `x` and child `y` these are the child's attachment
    /// vertex and the child's base node.
    pub fn attachment_points_with(
        &self,
        x: ClusterIndex,
        y: ClusterIndex,
    ) -> Option<(VertexIndex, VertexIndex)> {
        let from_x = self.bridge_to(x, y)?;
        let from_y = self.bridge_to(y, x)?;
        Some((from_x.attachment, from_y.attachment))
    }

    /// Returns the root of the hierarchy containing `x`.
    pub fn root_of(&self, x: ClusterIndex) -> ClusterIndex {
        let mut current = x;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    fn child_bridge(&self, child: ClusterIndex) -> LinkBridge {
        let cluster = &self[child];
        LinkBridge {
            // Non-root clusters always carry an attachment
            attachment: cluster.attachment.unwrap_or(cluster.base_node),
            cluster: Some(child),
        }
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl ClusterTree<'_> {
    /// Returns an iterator over clusters in pre-order:
    /// root first, then each child's subtree in discovery order.
    pub fn pre_order_iter(&self) -> ClusterPreOrderIter<'_> {
        ClusterPreOrderIter {
            clusters: &self.clusters,
            stack: vec![0],
        }
    }
}

/// Iterator for pre-order traversal of a [ClusterTree] (parents before children).
pub struct ClusterPreOrderIter<'a> {
    clusters: &'a [ClusterNode],
    stack: Vec<ClusterIndex>,
}

impl<'a> Iterator for ClusterPreOrderIter<'a> {
    type Item = &'a ClusterNode;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let cluster = &self.clusters[index];
        self.stack.extend(cluster.children.iter().rev());
        Some(cluster)
    }
}
