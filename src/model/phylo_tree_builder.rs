//! [TreeBuilder] producing [PhyloTree]s.

use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;
use crate::model::{PhyloTree, VertexIndex};

/// Builds [PhyloTree]s, one at a time.
///
/// Branch lengths handed to it must be non-negative and finite;
/// producers are expected to have validated them.
#[derive(Debug, Default)]
pub struct PhyloTreeBuilder {
    current_tree: Option<PhyloTree>,
}

impl PhyloTreeBuilder {
    pub fn new() -> Self {
        Self { current_tree: None }
    }

    fn tree_mut(&mut self) -> &mut PhyloTree {
        self.current_tree.get_or_insert_with(PhyloTree::new)
    }
}

impl TreeBuilder for PhyloTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = PhyloTree;

    fn init_next(&mut self, num_vertices: usize) {
        self.current_tree = Some(PhyloTree::with_capacity(num_vertices));
    }

    fn add_leaf(&mut self, name: String, branch_len: Option<f64>) -> Self::VertexIdx {
        self.tree_mut().add_leaf(name, branch_len.map(BranchLength::new))
    }

    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        name: String,
        branch_len: Option<f64>,
    ) -> Self::VertexIdx {
        self.tree_mut()
            .add_internal_vertex(children, name, branch_len.map(BranchLength::new))
    }

    fn add_root(
        &mut self,
        children: Vec<Self::VertexIdx>,
        name: String,
        branch_len: Option<f64>,
    ) -> Self::VertexIdx {
        self.tree_mut()
            .add_root(children, name, branch_len.map(BranchLength::new))
    }

    fn finish_tree(&mut self) -> Option<Self::Tree> {
        self.current_tree.take()
    }
}
