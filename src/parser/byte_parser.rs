//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for parsing Newick text with support
//! for peeking, consuming, comment skipping, and quote-aware label parsing.

use crate::parser::parsing_error::ParsingError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser over an owned in-memory buffer.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes with `''` escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use phylogroups::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [comment] (A:1,B:2);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_label(b"(),:;").unwrap(), "A");
/// ```
pub struct ByteParser {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the input
    pos: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` from a string by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::from_vec(input.as_bytes().to_vec())
    }

    /// Creates a new `ByteParser` taking ownership of the given bytes.
    pub fn from_vec(input: Vec<u8>) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new `ByteParser` reading the entire file into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut contents = Vec::new();
        File::open(path)?.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive ASCII whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment if present.
    ///
    /// Comments are enclosed in square brackets `[...]`.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }

        while let Some(b) = self.next_byte() {
            if b == b']' {
                return Ok(true);
            }
        }

        Err(ParsingError::unclosed_comment(self))
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte matches the target byte.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let end = (self.pos + k).min(self.input.len());
        let start = self.pos.min(end);
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Leading whitespace and comments are skipped first.
    /// An empty label is valid and returned as empty string.
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end an unquoted label
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed or a label is not
    /// valid UTF-8
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            self.parse_unquoted_label(delimiters)
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes within
    /// the label are escaped by doubling them (e.g., `'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns an error if the quoted label is not properly closed
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        let start = self.pos;
        self.next_byte(); // consume opening '

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    // Two single quotes in a row are an escaped quote
                    if self.consume_if(b'\'') {
                        label.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => label.push(b),
                None => {
                    self.pos = start;
                    return Err(ParsingError::unexpected_eof(self));
                }
            }
        }

        self.label_from_bytes(label, start)
    }

    /// Parses an unquoted label until any of the given delimiters or EOF is encountered.
    ///
    /// # Errors
    /// Returns an error if the label is not valid UTF-8
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            self.pos += 1;
        }

        let label = self.input[start..self.pos].to_vec();
        self.label_from_bytes(label, start)
    }

    /// Decodes label bytes, reporting an error at `start` if they are not UTF-8.
    fn label_from_bytes(&mut self, label: Vec<u8>, start: usize) -> Result<String, ParsingError> {
        String::from_utf8(label).map_err(|_| {
            self.pos = start;
            ParsingError::invalid_utf8(self)
        })
    }

    /// Consumes the longest run of bytes that may form a floating point
    /// number (digits, `.`, `-`, `+`, `e`, `E`) and returns it.
    pub fn parse_number_str(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                self.pos += 1;
            } else {
                break;
            }
        }

        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }
}
