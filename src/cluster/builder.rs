//! Construction of the cluster hierarchy by recursive boundary discovery.

use crate::cluster::node::{ClusterIndex, ClusterTree};
use crate::error::{Error, Result};
use crate::model::{PhyloTree, VertexIndex};
use tracing::{debug, warn};

/// Prefix of generated cluster names, followed by the creation counter.
pub const CLUSTER_NAME_PREFIX: &str = "Cluster_";

/// Builds a [ClusterTree] from a [PhyloTree] and an edge-length cutoff.
///
/// An original-tree edge whose length is strictly greater than the cutoff
/// is a boundary: the vertex below it becomes the base of a new cluster.
/// Missing branch lengths count as `0.0`.
///
/// Clusters are named `Cluster_0` (the root) onwards. All children of a
/// cluster are named in discovery order before any of them is expanded;
/// children are then expanded depth-first in that same order.
///
/// # Example
/// ```
/// use phylogroups::cluster::ClusterBuilder;
/// use phylogroups::parse_newick_str;
///
/// let tree = parse_newick_str("((A:1,B:1):3,(C:1,(D:1,E:1):0.5):2):0;").unwrap();
/// let clusters = ClusterBuilder::new(2.0).build(&tree).unwrap();
///
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters.root().name(), "Cluster_0");
/// assert_eq!(clusters.cluster(1).distance(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClusterBuilder {
    cutoff: f64,
    counter: usize,
}

impl ClusterBuilder {
    /// Creates a builder for the given cutoff.
    ///
    /// Any finite cutoff is accepted; cutoffs below the shortest edge
    /// split every edge, large cutoffs yield a single cluster.
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff, counter: 0 }
    }

    /// Builds the full cluster hierarchy of `tree`.
    ///
    /// # Errors
    /// * [Error::InvalidCutoff] - if the cutoff is NaN or infinite
    /// * [Error::MalformedTree] - if `tree` has no root, or a vertex is
    ///   reached twice (cycle or shared child)
    pub fn build<'t>(&mut self, tree: &'t PhyloTree) -> Result<ClusterTree<'t>> {
        if !self.cutoff.is_finite() {
            return Err(Error::InvalidCutoff(self.cutoff));
        }
        if !tree.is_root_set() || tree.root_index() >= tree.num_vertices() {
            return Err(Error::malformed("tree has no root"));
        }

        self.counter = 0;
        let mut clusters = ClusterTree::with_root(tree, self.cutoff, self.next_name());
        let mut visited = vec![false; tree.num_vertices()];

        // Clusters waiting for boundary discovery, expanded depth-first
        let mut pending: Vec<ClusterIndex> = vec![0];
        while let Some(current) = pending.pop() {
            let base_node = clusters[current].base_node();
            let boundaries = self.discover_boundaries(tree, base_node, &mut visited)?;
            debug!(
                cluster = clusters[current].name(),
                num_boundaries = boundaries.len(),
                "discovered boundaries"
            );

            let mut new_children = Vec::with_capacity(boundaries.len());
            for (attachment, child_base) in boundaries {
                let name = self.next_name();
                new_children.push(clusters.add_child(current, attachment, child_base, name));
            }
            pending.extend(new_children.into_iter().rev());
        }

        if clusters.len() == 1 {
            warn!(
                cutoff = self.cutoff,
                "no edge exceeds the cutoff; the whole tree forms a single cluster"
            );
        }

        Ok(clusters)
    }

    /// Returns the next cluster name and advances the counter.
    fn next_name(&mut self) -> String {
        let name = format!("{}{}", CLUSTER_NAME_PREFIX, self.counter);
        self.counter += 1;
        name
    }

    /// Searches depth-first from `base_node` for boundary edges.
    ///
    /// At each visited vertex `n`, each child `c` (in order) either is
    /// recorded as boundary `(n, c)` when its edge exceeds the cutoff, or is
    /// descended into. The search never continues below a boundary.
    /// Boundaries are returned in the order a recursive search meets them.
    ///
    /// `visited` is shared across all searches of one build, so a vertex
    /// reached twice reveals a cycle or a shared child.
    fn discover_boundaries(
        &self,
        tree: &PhyloTree,
        base_node: VertexIndex,
        visited: &mut [bool],
    ) -> Result<Vec<(VertexIndex, VertexIndex)>> {
        let mut boundaries = Vec::new();
        mark_visited(base_node, visited)?;

        // (parent, child) edges still to inspect, next edge on top
        let mut stack: Vec<(VertexIndex, VertexIndex)> = Vec::new();
        push_child_edges(tree, base_node, &mut stack)?;

        while let Some((parent, child)) = stack.pop() {
            if tree.distance_to_parent(child) > self.cutoff {
                boundaries.push((parent, child));
            } else {
                mark_visited(child, visited)?;
                push_child_edges(tree, child, &mut stack)?;
            }
        }

        Ok(boundaries)
    }
}

/// Pushes the edges from `parent` to its children, last child first.
fn push_child_edges(
    tree: &PhyloTree,
    parent: VertexIndex,
    stack: &mut Vec<(VertexIndex, VertexIndex)>,
) -> Result<()> {
    for &child in tree[parent].children().iter().rev() {
        if child >= tree.num_vertices() {
            return Err(Error::malformed(format!(
                "vertex {} lists child {} outside the tree",
                parent, child
            )));
        }
        stack.push((parent, child));
    }
    Ok(())
}

fn mark_visited(vertex: VertexIndex, visited: &mut [bool]) -> Result<()> {
    if visited[vertex] {
        return Err(Error::malformed(format!(
            "vertex {} is reachable more than once (cycle or shared child)",
            vertex
        )));
    }
    visited[vertex] = true;
    Ok(())
}
