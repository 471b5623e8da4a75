//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses a single
//! rooted tree of arbitrary arity, with optional leaf and internal names
//! and branch lengths.

use crate::model::tree_builder::TreeBuilder;
use crate::model::{BranchLength, PhyloTreeBuilder};
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick format phylogenetic trees.
///
/// Generic over [TreeBuilder] (construction).
///
/// Parsing is iterative: nesting depth is bounded by memory,
/// not by the call stack.
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) - generic constructor
/// * [`new_defaults()`](Self::new_defaults) - uses [PhyloTreeBuilder]
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse next tree from a [ByteParser]
/// * [`parse_single`](Self::parse_single) - Parse input holding exactly one tree
///
/// # Example
/// ```
/// use phylogroups::newick::NewickParser;
/// use phylogroups::parser::ByteParser;
///
/// let input = "((A_meleagrides:1.0,A_vulturinum:1.0)Acryllium:0.5,N_meleagris:1.5,G_plumifera:1.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new_defaults().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.root().children().len(), 3);
/// ```
pub struct NewickParser<T: TreeBuilder> {
    num_vertices: usize,
    tree_builder: T,
}

// ============================================================================
// Construction & Configuration, Deconstruction (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Creates a new [NewickParser] with the given tree builder.
    ///
    /// The builder is given the vertex count of the previously parsed tree
    /// as allocation hint.
    pub fn new(tree_builder: T) -> Self {
        Self {
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
            tree_builder,
        }
    }

    /// Consumes the parser and returns the tree builder.
    pub fn into_builder(self) -> T {
        self.tree_builder
    }
}

impl NewickParser<PhyloTreeBuilder> {
    /// Creates a new [NewickParser] for [PhyloTree](crate::model::PhyloTree)
    /// with default settings.
    pub fn new_defaults() -> Self {
        Self::new(PhyloTreeBuilder::new())
    }
}

impl Default for NewickParser<PhyloTreeBuilder> {
    fn default() -> Self {
        Self::new_defaults()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses the only Newick tree of the given input.
    ///
    /// Besides whitespace and `[...]` comments, nothing may follow the
    /// terminating `;`.
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the input is empty, not valid Newick,
    ///   or holds more than the one tree
    pub fn parse_single(&mut self, mut byte_parser: ByteParser) -> Result<T::Tree, ParsingError> {
        let tree = self.parse_str(&mut byte_parser)?;

        byte_parser.skip_comment_and_whitespace()?;
        if !byte_parser.is_eof() {
            return Err(ParsingError::trailing_content(&byte_parser));
        }

        Ok(tree)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str(&mut self, parser: &mut ByteParser) -> Result<T::Tree, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::empty_input(parser));
        }

        self.tree_builder.init_next(self.num_vertices);
        let num_vertices = self.parse_root(parser)?;
        self.num_vertices = num_vertices;

        self.tree_builder
            .finish_tree()
            .ok_or_else(|| ParsingError::without_context(ParsingErrorType::BuilderNotInitialized))
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses the tree up to and including its terminating `;`.
    ///
    /// A tree without parentheses is a single (root) leaf.
    ///
    /// # Returns
    /// - number of vertices added to the tree
    /// - [ParsingError] if something went wrong
    fn parse_root(&mut self, parser: &mut ByteParser) -> Result<usize, ParsingError> {
        let num_vertices = if parser.peek_is(b'(') {
            self.parse_nested(parser)?
        } else {
            let (name, branch_length) = self.parse_name_and_branch_length(parser)?;
            self.tree_builder.add_root(Vec::new(), name, branch_length);
            1
        };

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        Ok(num_vertices)
    }

    /// Parses a parenthesized tree and adds its vertices bottom-up:
    /// - `(child, child, ...)[name][:branch_length]`, nested arbitrarily
    /// - Expects parser at the outermost `(`
    ///
    /// Each open group keeps the indices of its children parsed so far;
    /// closing a group turns it into an internal vertex (or the root).
    ///
    /// # Returns
    /// - number of vertices added to the tree
    /// - [ParsingError] if something went wrong
    fn parse_nested(&mut self, parser: &mut ByteParser) -> Result<usize, ParsingError> {
        let mut open_groups: Vec<Vec<T::VertexIdx>> = Vec::new();
        let mut num_vertices = 0;

        loop {
            // Descend: open groups until reaching a leaf
            parser.skip_comment_and_whitespace()?;
            while parser.consume_if(b'(') {
                open_groups.push(Vec::new());
                parser.skip_comment_and_whitespace()?;
            }

            let (name, branch_length) = self.parse_name_and_branch_length(parser)?;
            let mut finished = self.tree_builder.add_leaf(name, branch_length);
            num_vertices += 1;

            // Ascend: attach finished vertex, closing groups as they end
            loop {
                parser.skip_comment_and_whitespace()?;
                let Some(siblings) = open_groups.last_mut() else {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        "Unbalanced parentheses".to_string(),
                    ));
                };
                siblings.push(finished);

                if parser.consume_if(b',') {
                    break;
                }
                if !parser.consume_if(b')') {
                    if parser.is_eof() {
                        return Err(ParsingError::unexpected_eof(parser));
                    }
                    let next_char = parser.peek().map(char::from);
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after vertex but found {:?}", next_char),
                    ));
                }

                let children = std::mem::take(siblings);
                open_groups.pop();
                let (name, branch_length) = self.parse_name_and_branch_length(parser)?;
                num_vertices += 1;

                if open_groups.is_empty() {
                    self.tree_builder.add_root(children, name, branch_length);
                    return Ok(num_vertices);
                }
                finished = self.tree_builder.add_internal(children, name, branch_length);
            }
        }
    }

    /// Parses the optional name and optional branch length following a
    /// leaf position or a closing `)`.
    fn parse_name_and_branch_length(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<(String, Option<f64>), ParsingError> {
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;
        Ok((name, branch_length))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a valid branch length
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is not a non-negative, finite number
    fn parse_branch_length(&mut self, parser: &mut ByteParser) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let branch_length_str = parser.parse_number_str();
        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_branch_length(
                parser,
                format!("'{}' is not a number", branch_length_str),
            )
        })?;

        match BranchLength::try_new(value) {
            Some(_) => Ok(Some(value)),
            None => Err(ParsingError::invalid_branch_length(
                parser,
                format!("{} is negative or not finite", value),
            )),
        }
    }
}
