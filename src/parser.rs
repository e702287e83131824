////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! The `Parser` type and its core combinators: sequencing, binding,
//! mapping, alternation, labeling, and position capture.
////////////////////////////////////////////////////////////////////////////////

// Local imports.
use crate::error::ParseError;
use crate::input::{line_info_at, Input};
use crate::primitive::eof;
use crate::result::{Diagnostics, Failure, Reply, Success};

// Standard library imports.
use std::cell::RefCell;
use std::rc::Rc;


////////////////////////////////////////////////////////////////////////////////
// Parser
////////////////////////////////////////////////////////////////////////////////
type RunFn<O> = dyn Fn(&Input, usize) -> Reply<O>;

/// A parser producing a value of type `O`.
///
/// A `Parser` wraps an opaque, reference-counted function from
/// `(input, index)` to a [`Reply<O>`]. It carries no mutable state, so
/// it can be cloned cheaply and reused across any number of
/// [`parse`](Parser::parse) calls, including concurrently from
/// different threads.
pub struct Parser<O> {
    run: Rc<RunFn<O>>,
}

impl<O> Clone for Parser<O> {
    fn clone(&self) -> Self {
        Parser { run: Rc::clone(&self.run) }
    }
}

impl<O: 'static> Parser<O> {
    /// Constructs a parser from its run function.
    pub fn new<F>(run: F) -> Self
        where F: Fn(&Input, usize) -> Reply<O> + 'static
    {
        Parser { run: Rc::new(run) }
    }

    /// Runs this parser at `index` in `input`.
    pub(crate) fn run(&self, input: &Input, index: usize) -> Reply<O> {
        (self.run)(input, index)
    }

    /// Runs this parser against the full text, requiring every code
    /// point to be consumed.
    ///
    /// Equivalent to composing `self` with an `eof` check; on failure,
    /// raises a [`ParseError`] carrying the diagnostics merged across
    /// every sub-parser consulted during the attempt.
    pub fn parse(&self, text: &str) -> Result<O, ParseError> {
        let input = Input::new(text);
        let span = tracing::debug_span!("parse", len = input.len());
        let _enter = span.enter();

        match self.clone().skip(eof()).run(&input, 0) {
            Ok(success) => Ok(success.value),
            Err(failure) => {
                tracing::trace!(
                    furthest = failure.diagnostics.furthest,
                    "parse failed");
                Err(ParseError::new(
                    failure.diagnostics.expected,
                    text.to_owned(),
                    failure.diagnostics.furthest))
            }
        }
    }

    /// Runs this parser against the given text without requiring
    /// end-of-input, returning the parsed value and the index of the
    /// first unconsumed code point.
    pub fn parse_partial(&self, text: &str) -> Result<(O, usize), ParseError> {
        let input = Input::new(text);
        match self.run(&input, 0) {
            Ok(success) => Ok((success.value, success.index)),
            Err(failure) => Err(ParseError::new(
                failure.diagnostics.expected,
                text.to_owned(),
                failure.diagnostics.furthest)),
        }
    }

    /// Sequences this parser with `other`, running `other` at the index
    /// left by a successful `self`. The value of `other` is kept; `self`'s
    /// diagnostics are merged in regardless of which value wins.
    pub fn then<P: 'static>(self, other: Parser<P>) -> Parser<P> {
        Parser::new(move |input, index| {
            let first = self.run(input, index)?;
            match other.run(input, first.index) {
                Ok(second) => Ok(Success {
                    index: second.index,
                    value: second.value,
                    diagnostics: first.diagnostics.merge(second.diagnostics),
                }),
                Err(failure) => Err(Failure {
                    diagnostics: first.diagnostics.merge(failure.diagnostics),
                }),
            }
        })
    }

    /// Sequences this parser with `other`, keeping `self`'s value and
    /// discarding `other`'s. Diagnostics from both are merged.
    ///
    /// This is the `<<` ("skip") operator used throughout the surface
    /// grammar (e.g. `value << terminator`); it is not a primitive
    /// listed alongside `then`/`bind` but is required to express the
    /// common "parse this, then require (and discard) a delimiter"
    /// pattern.
    pub fn skip<P: 'static>(self, other: Parser<P>) -> Parser<O> {
        Parser::new(move |input, index| {
            let first = self.run(input, index)?;
            match other.run(input, first.index) {
                Ok(second) => Ok(Success {
                    index: second.index,
                    value: first.value,
                    diagnostics: first.diagnostics.merge(second.diagnostics),
                }),
                Err(failure) => Err(Failure {
                    diagnostics: first.diagnostics.merge(failure.diagnostics),
                }),
            }
        })
    }

    /// Runs this parser, then computes and runs a second parser from
    /// its value. `f` is only invoked on success.
    pub fn bind<P: 'static>(self, f: impl Fn(O) -> Parser<P> + 'static) -> Parser<P> {
        Parser::new(move |input, index| {
            let first = self.run(input, index)?;
            let next = f(first.value);
            match next.run(input, first.index) {
                Ok(second) => Ok(Success {
                    index: second.index,
                    value: second.value,
                    diagnostics: first.diagnostics.merge(second.diagnostics),
                }),
                Err(failure) => Err(Failure {
                    diagnostics: first.diagnostics.merge(failure.diagnostics),
                }),
            }
        })
    }

    /// Replaces a successful value with `f(value)`.
    pub fn map<P: 'static>(self, f: impl Fn(O) -> P + 'static) -> Parser<P> {
        Parser::new(move |input, index| {
            self.run(input, index).map(|success| success.map_value(&f))
        })
    }

    /// Tries `self`; if it fails, backtracks to the original index and
    /// tries `other`. Diagnostics from both attempts are merged
    /// regardless of which branch's value is returned.
    pub fn or(self, other: Parser<O>) -> Parser<O> {
        let span = tracing::debug_span!("or");
        Parser::new(move |input, index| {
            let _enter = span.enter();
            match self.run(input, index) {
                Ok(success) => Ok(success),
                Err(first) => {
                    tracing::trace!(index, "left branch failed, backtracking");
                    match other.run(input, index) {
                        Ok(success) => Ok(Success {
                            diagnostics: first.diagnostics.merge(success.diagnostics),
                            ..success
                        }),
                        Err(second) => Err(Failure {
                            diagnostics: first.diagnostics.merge(second.diagnostics),
                        }),
                    }
                }
            }
        })
    }

    /// Replaces the expected-set of this parser's result with `{label}`,
    /// but only when the result's `furthest` equals the parser's own
    /// starting index (i.e. the parser made no progress past its own
    /// start). Otherwise the inner diagnostics — which describe a
    /// failure further along — are kept as-is.
    pub fn desc(self, label: impl Into<String>) -> Parser<O> {
        let label = label.into();
        Parser::new(move |input, index| {
            match self.run(input, index) {
                Ok(success) => {
                    if success.diagnostics.furthest == index {
                        Ok(Success {
                            diagnostics: Diagnostics::single(index, label.clone()),
                            ..success
                        })
                    } else {
                        Ok(success)
                    }
                }
                Err(failure) => {
                    if failure.diagnostics.furthest == index {
                        Err(Failure { diagnostics: Diagnostics::single(index, label.clone()) })
                    } else {
                        Err(failure)
                    }
                }
            }
        })
    }

    /// Wraps this parser's value in the `(start, value, end)` triple,
    /// where `start` and `end` are `(line, column)` positions computed
    /// from the code point indices before and after this parser ran.
    /// A failure of `self` propagates unchanged.
    pub fn mark(self) -> Parser<((usize, usize), O, (usize, usize))> {
        Parser::new(move |input, index| {
            let start = line_info_at(input.text(), index)
                .expect("mark: starting index is always within its own input");
            let success = self.run(input, index)?;
            let end = line_info_at(input.text(), success.index)
                .expect("mark: resulting index is always within its own input");
            Ok(Success {
                index: success.index,
                value: (start, success.value, end),
                diagnostics: success.diagnostics,
            })
        })
    }
}


////////////////////////////////////////////////////////////////////////////////
// forward
////////////////////////////////////////////////////////////////////////////////
/// A bindable slot for a [`Parser<O>`], letting mutually recursive
/// grammars refer to a parser before it is built.
///
/// [`forward`] returns a `(Parser<O>, Forward<O>)` pair: the `Parser`
/// may be used immediately in the grammar, but invoking it before
/// [`Forward::bind`] is called is a programmer error (it panics), not a
/// [`ParseError`](crate::ParseError).
pub struct Forward<O> {
    cell: Rc<RefCell<Option<Parser<O>>>>,
}

impl<O: 'static> Forward<O> {
    /// Binds the forward reference to the given parser. Only the first
    /// call has any effect; subsequent calls overwrite the binding,
    /// which is useful for tests but unusual in grammars.
    pub fn bind(&self, parser: Parser<O>) {
        *self.cell.borrow_mut() = Some(parser);
    }
}

/// Constructs a forward-declared parser reference; see [`Forward`].
pub fn forward<O: 'static>() -> (Parser<O>, Forward<O>) {
    let cell: Rc<RefCell<Option<Parser<O>>>> = Rc::new(RefCell::new(None));
    let cell_for_run = Rc::clone(&cell);

    let parser = Parser::new(move |input, index| {
        let inner = cell_for_run.borrow();
        match inner.as_ref() {
            Some(bound) => bound.run(input, index),
            None => panic!("forward parser used before Forward::bind was called"),
        }
    });

    (parser, Forward { cell })
}


#[cfg(test)]
mod tests {
    use crate::primitive::string;

    #[test]
    fn then_keeps_right_value_merges_diagnostics() {
        let parser = string("x").then(string("y"));
        assert_eq!(parser.parse("xy").unwrap(), "y");
        assert!(parser.parse("y").is_err());
    }

    #[test]
    fn skip_keeps_left_value() {
        let parser = string("x").skip(string("y"));
        assert_eq!(parser.parse("xy").unwrap(), "x");
    }

    #[test]
    fn bind_only_invoked_on_success() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let piped: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let piped_for_closure = Rc::clone(&piped);

        let parser = string("x").bind(move |x| {
            *piped_for_closure.borrow_mut() = Some(x);
            string("y")
        });

        assert_eq!(parser.parse("xy").unwrap(), "y");
        assert_eq!(piped.borrow().as_deref(), Some("x"));
        assert!(parser.parse("x").is_err());
    }

    #[test]
    fn or_backtracks_to_shared_start() {
        let parser = string("x").then(string("y")).or(string("z"));
        assert_eq!(parser.parse("z").unwrap(), "z");
    }

    #[test]
    fn mark_captures_positions() {
        use crate::classes::letter;

        let parser = (letter().many().mark().skip(string("\n"))).many();
        let lines = parser.parse("asdf\nqwer\n").unwrap();

        assert_eq!(lines.len(), 2);
        let (start, letters, end) = &lines[0];
        assert_eq!(*start, (0, 0));
        assert_eq!(letters, &vec!["a".to_owned(), "s".to_owned(), "d".to_owned(), "f".to_owned()]);
        assert_eq!(*end, (0, 4));

        let (start, letters, end) = &lines[1];
        assert_eq!(*start, (1, 0));
        assert_eq!(letters, &vec!["q".to_owned(), "w".to_owned(), "e".to_owned(), "r".to_owned()]);
        assert_eq!(*end, (1, 4));
    }

    #[test]
    fn forward_supports_recursive_grammars() {
        use super::forward;
        use crate::primitive::{string, success};

        // balanced: 'a' balanced 'b' | empty
        let (balanced, slot) = forward::<String>();
        let recurse = balanced.clone();
        let nested = string("a").bind(move |a| {
            let recurse = recurse.clone();
            recurse.bind(move |mid| {
                let prefix = format!("{}{}", a, mid);
                string("b").map(move |_| format!("{}b", prefix))
            })
        });
        slot.bind(nested.or(success(String::new())));

        assert_eq!(balanced.parse("aabb").unwrap(), "aabb");
        assert_eq!(balanced.parse("").unwrap(), "");
    }
}
