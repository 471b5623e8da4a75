//! Utility functions for label escaping in Newick output.
//!
//! Labels are stored verbatim when parsed (quotes removed, `''` unescaped).
//! When writing, a label that could not be read back verbatim as an unquoted
//! label is wrapped in single quotes.

/// Characters that end an unquoted Newick label.
const NEWICK_METACHARACTERS: &[char] = &[',', ';', '(', ')', ':', '[', ']', '\''];

/// Checks whether a label must be single quoted to survive a
/// Newick round trip.
///
/// # Examples
/// ```
/// # use phylogroups::parser::utils::needs_quoting;
/// assert!(!needs_quoting("Pukeko"));
/// assert!(!needs_quoting("Australasian_Swamphen"));
/// assert!(needs_quoting("Australasian Swamphen"));
/// assert!(needs_quoting("Pu[ke]ko"));
/// assert!(needs_quoting("Baillon's_Crake"));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label
        .chars()
        .any(|c| c.is_whitespace() || NEWICK_METACHARACTERS.contains(&c))
}

/// Escapes a label for safe use in Newick strings.
///
/// Labels containing whitespace or Newick metacharacters are wrapped in
/// single quotes, with internal single quotes doubled. Other labels
/// (including the empty label) are returned unchanged.
///
/// # Examples
/// ```
/// # use phylogroups::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label(""), "");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
