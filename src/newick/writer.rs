//! Newick format writing.

use crate::model::tree::VertexIndex;
use crate::model::{PhyloTree, Vertex};
use crate::parser::utils::escape_label;
use std::io::{self, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Style for serializing a tree to Newick format,
/// controlling which vertex names appear in the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewickStyle {
    /// Write names of leaves and of internal vertices (including the root)
    #[default]
    AllNames,
    /// Write names of leaves only
    LeafNames,
}

/// One step of the iterative writer.
enum Step {
    Enter(VertexIndex),
    Separator,
    Close(VertexIndex),
}

/// Writes the given tree in Newick format, followed by a newline.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick<W: Write>(writer: &mut W, tree: &PhyloTree, style: NewickStyle) -> io::Result<()> {
    let newick = to_newick(tree, style);
    writer.write_all(newick.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Branch lengths are written where present; the root's branch length
/// only if the root has one.
///
/// # Example
/// ```
/// use phylogroups::newick::{NewickStyle, to_newick};
/// use phylogroups::model::{BranchLength, PhyloTree};
///
/// let mut tree = PhyloTree::new();
/// let a = tree.add_leaf("A".to_string(), Some(BranchLength::new(1.0)));
/// let b = tree.add_leaf("B".to_string(), Some(BranchLength::new(2.5)));
/// tree.add_root(vec![a, b], "R".to_string(), None);
///
/// assert_eq!(to_newick(&tree, NewickStyle::AllNames), "(A:1,B:2.5)R;");
/// assert_eq!(to_newick(&tree, NewickStyle::LeafNames), "(A:1,B:2.5);");
/// ```
pub fn to_newick(tree: &PhyloTree, style: NewickStyle) -> String {
    if !tree.is_root_set() {
        return String::new();
    }
    build_newick(tree, tree.root_index(), style, true)
}

/// Returns the Newick representation of the subtree rooted at `index`.
///
/// The subtree root's own branch length is omitted, as it leads
/// outside the subtree.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn subtree_to_newick(tree: &PhyloTree, index: VertexIndex, style: NewickStyle) -> String {
    build_newick(tree, index, style, false)
}

fn build_newick(tree: &PhyloTree, start: VertexIndex, style: NewickStyle, with_start_length: bool) -> String {
    // Helper for adding name and branch length of a vertex
    fn push_vertex_suffix(newick: &mut String, vertex: &Vertex, write_name: bool, write_length: bool) {
        if write_name {
            newick.push_str(&escape_label(vertex.name()));
        }
        if !write_length {
            return;
        }
        if let Some(branch_length) = vertex.branch_length() {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let mut stack = vec![Step::Enter(start)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index) => {
                let vertex = &tree[index];
                if vertex.is_leaf() {
                    let write_length = index != start || with_start_length;
                    push_vertex_suffix(&mut newick, vertex, true, write_length);
                } else {
                    newick.push('(');
                    stack.push(Step::Close(index));
                    // Push last child first, separators in between
                    for (position, &child) in vertex.children().iter().enumerate().rev() {
                        stack.push(Step::Enter(child));
                        if position > 0 {
                            stack.push(Step::Separator);
                        }
                    }
                }
            }
            Step::Separator => newick.push(','),
            Step::Close(index) => {
                newick.push(')');
                let write_name = style == NewickStyle::AllNames;
                let write_length = index != start || with_start_length;
                push_vertex_suffix(&mut newick, &tree[index], write_name, write_length);
            }
        }
    }

    newick.push(';');
    newick
}

/// Estimates the length of a Newick string for a given tree.
///
/// Used to pre-allocate string capacity for efficient writing.
pub(crate) fn estimate_newick_len(tree: &PhyloTree) -> usize {
    // Per vertex: "(", ")" or "," ~= 2 chars
    const STRUCTURE_CHARS: usize = 2;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let name_capacity: usize = tree.vertices().iter().map(|v| v.name().len()).sum();
    let branch_capacity = tree
        .vertices()
        .iter()
        .filter(|v| v.has_branch_length())
        .count()
        * BRANCH_LENGTH_CHARS;

    tree.num_vertices() * STRUCTURE_CHARS + name_capacity + branch_capacity + BUFFER_CHARS
}
