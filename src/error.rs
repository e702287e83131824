////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Parse errors and domain (programmer) errors.
////////////////////////////////////////////////////////////////////////////////

// Local imports.
use crate::input::line_info_at;

// Standard library imports.
use std::collections::BTreeSet;


////////////////////////////////////////////////////////////////////////////////
// ParseError
////////////////////////////////////////////////////////////////////////////////
/// The error raised by [`Parser::parse`](crate::Parser::parse) when the
/// input does not match the grammar.
///
/// Carries the merged expected-set and furthest-reached index from
/// every sub-parser consulted during the attempt, along with the
/// original input, so its [`Display`](std::fmt::Display) rendering can
/// report source coordinates.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct ParseError {
    /// The labels describing what would have allowed parsing to
    /// continue at `index`.
    pub expected: BTreeSet<String>,
    /// The full input that was being parsed.
    pub stream: String,
    /// The furthest code point index reached by any sub-parser.
    pub index: usize,
}

impl ParseError {
    /// Constructs a new `ParseError`.
    pub(crate) fn new(expected: BTreeSet<String>, stream: String, index: usize) -> Self {
        ParseError { expected, stream, index }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (line, column) = line_info_at(&self.stream, self.index)
            .expect("ParseError index is always within its own stream");

        let mut labels: Vec<&String> = self.expected.iter().collect();
        labels.sort();

        match labels.as_slice() {
            [] => write!(f, "parse failed at {}:{}", line, column),
            [single] => write!(f, "expected '{}' at {}:{}", single, line, column),
            many => {
                write!(f, "expected one of ")?;
                for (i, label) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}'", label)?;
                }
                write!(f, " at {}:{}", line, column)
            }
        }
    }
}

impl std::error::Error for ParseError {}


////////////////////////////////////////////////////////////////////////////////
// DomainError
////////////////////////////////////////////////////////////////////////////////
/// An error raised immediately for programmer mistakes, as distinct from
/// a [`ParseError`], which represents an ordinary parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// [`line_info_at`](crate::line_info_at) was called with an index
    /// past the end of the text.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of code points in the text.
        len: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::IndexOutOfRange { index, len } => write!(
                f,
                "index {} out of range for text of {} code points",
                index, len),
        }
    }
}

impl std::error::Error for DomainError {}
