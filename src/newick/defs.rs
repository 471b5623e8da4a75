//! Constants for Newick parsing.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"()[],:; \n\t\r";

/// Default guess for number of vertices, when unknown
pub(crate) const DEFAULT_NUM_VERTICES_GUESS: usize = 32;
