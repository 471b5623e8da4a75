//! Synthesis of the profile tree: one vertex per cluster.

use crate::cluster::node::{ClusterIndex, ClusterTree};
use crate::model::{PhyloTree, PhyloTreeBuilder, TreeBuilder};

/// Projects a cluster hierarchy onto a new [PhyloTree].
///
/// See [synthesize_profile_with] for details.
pub fn synthesize_profile(clusters: &ClusterTree<'_>) -> PhyloTree {
    // The builder always holds a tree after init_next
    synthesize_profile_with(clusters, &mut PhyloTreeBuilder::new()).unwrap_or_default()
}

/// Projects a cluster hierarchy onto a tree built by `builder`.
///
/// Each cluster becomes one vertex named after it, with the cluster's
/// distance as branch length (`0` for the root). Parent/child relations and
/// sibling order mirror the hierarchy exactly. Vertices are added
/// children-first, following a post-order over the clusters.
///
/// # Returns
/// The tree from [`TreeBuilder::finish_tree`].
pub fn synthesize_profile_with<T: TreeBuilder>(
    clusters: &ClusterTree<'_>,
    builder: &mut T,
) -> Option<T::Tree> {
    builder.init_next(clusters.len());
    let mut built: Vec<Option<T::VertexIdx>> = vec![None; clusters.len()];

    // (cluster, children_built)
    let mut stack: Vec<(ClusterIndex, bool)> = vec![(clusters.root().index(), false)];
    while let Some((index, children_built)) = stack.pop() {
        let cluster = &clusters[index];

        if !children_built && !cluster.children().is_empty() {
            stack.push((index, true));
            for &child in cluster.children().iter().rev() {
                stack.push((child, false));
            }
            continue;
        }

        let children: Vec<T::VertexIdx> = cluster
            .children()
            .iter()
            .filter_map(|&child| built[child])
            .collect();
        let name = cluster.name().to_string();

        built[index] = Some(if cluster.is_root() {
            builder.add_root(children, name, Some(0.0))
        } else if children.is_empty() {
            builder.add_leaf(name, Some(cluster.distance()))
        } else {
            builder.add_internal(children, name, Some(cluster.distance()))
        });
    }

    builder.finish_tree()
}
