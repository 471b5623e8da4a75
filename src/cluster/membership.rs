//! Owned regions of clusters and the cluster membership listing.
//!
//! # Listing format
//! For each cluster in pre-order (root first, then children in discovery
//! order):
//! ```text
//! >Cluster_1
//! @(A:1,B:1);          <- only with `with_subtrees`
//! A
//! B
//! ```
//! The header line is followed by one line per named vertex of the
//! cluster's owned region, in the order of [owned_region].

use crate::cluster::node::{ClusterIndex, ClusterTree};
use crate::model::VertexIndex;
use crate::newick::{NewickStyle, subtree_to_newick};
use std::collections::HashSet;
use std::io::{self, Write};

/// Returns the original-tree vertices owned by a cluster.
///
/// Bounded depth-first search from the cluster's base node in pre-order,
/// siblings in tree order. A child vertex that is the base node of one of the
/// cluster's child clusters is not entered: that subtree belongs to the
/// child cluster. Over all clusters, owned regions partition the tree.
///
/// # Panics
/// Panics if `cluster` is out of bounds.
pub fn owned_region(clusters: &ClusterTree<'_>, cluster: ClusterIndex) -> Vec<VertexIndex> {
    let tree = clusters.original_tree();
    let child_bases: HashSet<VertexIndex> = clusters
        .children(cluster)
        .iter()
        .map(|&child| clusters[child].base_node())
        .collect();

    let mut region = Vec::new();
    let mut stack = vec![clusters[cluster].base_node()];
    while let Some(vertex) = stack.pop() {
        region.push(vertex);
        for &child in tree[vertex].children().iter().rev() {
            if !child_bases.contains(&child) {
                stack.push(child);
            }
        }
    }

    region
}

/// Returns the non-empty names of the vertices owned by a cluster,
/// in the order of [owned_region].
pub fn member_names<'t>(clusters: &ClusterTree<'t>, cluster: ClusterIndex) -> Vec<&'t str> {
    let tree = clusters.original_tree();
    owned_region(clusters, cluster)
        .into_iter()
        .map(|vertex| tree[vertex].name())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Options for [write_membership].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MembershipOptions {
    /// Add an `@` line with the Newick string of the original subtree
    /// rooted at each cluster's base node.
    pub with_subtrees: bool,
}

/// Writes the membership listing of all clusters.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_membership<W: Write>(
    writer: &mut W,
    clusters: &ClusterTree<'_>,
    options: MembershipOptions,
) -> io::Result<()> {
    writer.write_all(membership_to_string(clusters, options).as_bytes())
}

/// Returns the membership listing of all clusters as a string.
pub fn membership_to_string(clusters: &ClusterTree<'_>, options: MembershipOptions) -> String {
    let tree = clusters.original_tree();
    let mut listing = String::new();
    for cluster in clusters.pre_order_iter() {
        listing.push('>');
        listing.push_str(cluster.name());
        listing.push('\n');
        if options.with_subtrees {
            listing.push('@');
            listing.push_str(&subtree_to_newick(tree, cluster.base_node(), NewickStyle::AllNames));
            listing.push('\n');
        }
        for name in member_names(clusters, cluster.index()) {
            listing.push_str(name);
            listing.push('\n');
        }
    }
    listing
}
