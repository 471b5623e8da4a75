//! Partitioning of a phylogenetic tree into a hierarchy of clusters.
//!
//! A single edge-length cutoff splits the original tree at every edge
//! longer than the cutoff. Each resulting contiguous region is a cluster;
//! clusters form a hierarchy mirroring how the regions hang from each other.
//!
//! * [ClusterBuilder] - builds the [ClusterTree] hierarchy
//! * [ClusterTree] / [ClusterNode] / [LinkBridge] - hierarchy and navigation
//! * [owned_region], [member_names], [write_membership] - membership
//! * [synthesize_profile] - profile tree with one vertex per cluster

pub mod builder;
pub mod membership;
pub mod node;
pub mod profile;

pub use builder::{CLUSTER_NAME_PREFIX, ClusterBuilder};
pub use membership::{
    MembershipOptions, member_names, membership_to_string, owned_region, write_membership,
};
pub use node::{ClusterIndex, ClusterNode, ClusterPreOrderIter, ClusterTree, LinkBridge};
pub use profile::{synthesize_profile, synthesize_profile_with};
