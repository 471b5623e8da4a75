//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick format strings
//! into tree structures, using a [TreeBuilder](crate::model::TreeBuilder)
//! internally, and functions to write trees back as Newick strings.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a file holding one tree, returns a [PhyloTree]
//! * [`parse_str`] - parses a single string, returns a [PhyloTree]
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex { ',' vertex } ')' [label] [branch_length]`
//! * `leaf ::= [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels may be single quoted, with `''` escaping a quote
//! * Comments are square brackets and can occur anywhere whitespace is allowed;
//!   extended annotations such as `[&&NHX:S=human]` are skipped as comments

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{NewickStyle, subtree_to_newick, to_newick, write_newick};

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a file holding exactly one Newick tree.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the file
/// * [ParsingError] - If file reading fails, the Newick format is invalid,
///   or the file holds anything besides one tree, whitespace and comments
///
/// # Example
/// ```no_run
/// use phylogroups::newick::parse_file;
///
/// let tree = parse_file("anseriformes.nwk")?;
/// println!("Parsed tree with {} leaves", tree.num_leaves());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new_defaults().parse_single(byte_parser)
}

/// Parses a single Newick string to obtain a [PhyloTree].
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use phylogroups::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    NewickParser::new_defaults().parse_single(ByteParser::for_str(newick.as_ref()))
}
