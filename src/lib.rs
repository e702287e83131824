////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! A small, composable toolkit for building top-down parsers over
//! complete in-memory text.
//!
//! A grammar is built by combining primitive parsers ([`string`],
//! [`regex`], [`test_char`], …) with combinators ([`Parser::then`],
//! [`Parser::bind`], [`Parser::map`], [`Parser::or`], repetition,
//! [`Parser::sep_by`], [`Parser::mark`], [`Parser::desc`]) and the
//! generator-style binding in [`generate`]. The resulting [`Parser<O>`]
//! accepts a `&str` and yields either `O` or a [`ParseError`] carrying
//! source coordinates.
//!
//! The engine is interpretive and single-threaded: a [`Parser::parse`]
//! call is a pure function of the parser and the input, with no shared
//! mutable state, no streaming, and no grammar analysis.
////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs)]

// Internal modules.
mod classes;
mod combinators;
mod error;
mod generate;
mod input;
mod parser;
mod primitive;
mod repeat;
mod result;

// Exports.
pub use crate::classes::*;
pub use crate::combinators::*;
pub use crate::error::*;
pub use crate::generate::*;
pub use crate::input::line_info_at;
pub use crate::parser::*;
pub use crate::primitive::*;
pub use crate::result::*;
