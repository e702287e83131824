////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Generator-style grammar binding.
//!
//! The source grammar this engine distills expresses multi-step,
//! value-dependent parsing as a generator body: `yield` a parser,
//! receive its value, decide the next parser from it, and eventually
//! return a result. Rust has no resumable-function primitive to host
//! that directly, so this module takes the builder-API realization the
//! two-way design space allows: a generator body is written as a chain
//! of ordinary [`Parser::bind`] calls, and [`generate`] just wraps that
//! chain so it reads, traces, and fails the same way a primitive
//! combinator would. The [`generate!`] macro below gives that chain a
//! straight-line, do-notation surface so the binding structure does not
//! have to be spelled out by hand.
////////////////////////////////////////////////////////////////////////////////

// Local imports.
use crate::parser::Parser;


////////////////////////////////////////////////////////////////////////////////
// generate
////////////////////////////////////////////////////////////////////////////////
/// Wraps a generator body — a closure that builds and returns the
/// `bind`-chain that is the grammar's actual meaning — as a parser in
/// its own right.
///
/// `body` is called once per [`Parser::new`] construction semantics:
/// each time the returned parser runs, `body()` is invoked to produce
/// the chain, which is then run at the current index. This matches the
/// source semantics of re-entering the generator body fresh on every
/// `parse` attempt, so a generator used inside [`Parser::or`] or
/// [`Parser::many`] starts over cleanly on each attempt rather than
/// resuming stale state.
pub fn generate<O: 'static>(body: impl Fn() -> Parser<O> + 'static) -> Parser<O> {
    Parser::new(move |input, index| {
        let span = tracing::debug_span!("generate");
        let _enter = span.enter();
        body().run(input, index)
    })
}

/// Equivalent to `generate(body).desc(label)`: builds a generator
/// parser and immediately labels it, per the source's optional label
/// argument on the generator decorator.
pub fn generate_desc<O: 'static>(label: impl Into<String>, body: impl Fn() -> Parser<O> + 'static) -> Parser<O> {
    generate(body).desc(label)
}


////////////////////////////////////////////////////////////////////////////////
// generate! (do-notation)
////////////////////////////////////////////////////////////////////////////////
/// Builds a generator body as a straight-line sequence of bindings,
/// desugaring to nested [`Parser::bind`] calls.
///
/// ```ignore
/// generate! {
///     let a = string("a");
///     let b = string("b");
///     success(format!("{}{}", a, b))
/// }
/// ```
///
/// Each `let name = parser;` line runs `parser`, binds its value to
/// `name` (in scope for every later line), and moves on only on
/// success — exactly the generator's `yield`/resume step, expressed
/// without a resumable function. The final line is an expression that
/// must itself evaluate to a `Parser<O>`; it is typically `success(v)`
/// or another parser built from the bound names.
///
/// This macro only assembles the chain; it does not call [`generate`]
/// itself; wrap the whole invocation in `generate(|| generate! { ... })`
/// to get tracing and re-entrant semantics, or use it directly wherever
/// a `Parser<O>` value is expected (e.g. as a `bind` continuation).
#[macro_export]
macro_rules! generate {
    (let $name:ident = $parser:expr; $($rest:tt)+) => {
        $crate::Parser::bind($parser, move |$name| {
            $crate::generate!($($rest)+)
        })
    };
    ($tail:expr) => {
        $tail
    };
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{fail, string, success};

    #[test]
    fn generate_threads_bound_values() {
        let parser = generate(|| generate! {
            let a = string("a");
            let b = string("b");
            success(format!("{}{}", a, b))
        });

        assert_eq!(parser.parse("ab").unwrap(), "ab");

        let err = parser.parse("ax").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.to_string(), "expected 'b' at 0:1");
    }

    #[test]
    fn generate_can_return_a_parser_built_from_bound_values() {
        // Rather than always ending on `success`, a generator body may
        // tail-call directly into another parser, matching the source's
        // "return a parser" generator case.
        let parser = generate(|| generate! {
            let count = string("1").map(|_| 1usize).or(string("2").map(|_| 2usize));
            string("x").times(count)
        });

        assert_eq!(parser.parse("1x").unwrap(), vec!["x".to_owned()]);
        assert_eq!(parser.parse("2xx").unwrap(), vec!["x".to_owned(), "x".to_owned()]);
        assert!(parser.parse("2x").is_err());
    }

    #[test]
    fn generate_desc_labels_the_whole_body() {
        let parser = generate_desc("greeting", || generate! {
            let _ = string("hello");
            success(())
        });

        let err = parser.parse("goodbye").unwrap_err();
        assert_eq!(err.to_string(), "expected 'greeting' at 0:0");
    }

    #[test]
    fn generate_default_desc_reports_innermost_label_when_progress_was_made() {
        let parser = generate(|| generate! {
            let _ = string("a");
            string("b")
        });

        // Progress was made past the generator's own start, so the
        // inner label ("b") is reported, not a generator-level label —
        // there is none here, since no `desc` was applied.
        let err = parser.parse("ax").unwrap_err();
        assert_eq!(err.to_string(), "expected 'b' at 0:1");
    }

    #[test]
    fn generate_backtracks_cleanly_inside_alternation() {
        let inner = generate(|| generate! {
            let _ = string("a");
            string("zzz")
        });
        let parser = inner.or(string("a").map(|_| "fallback".to_owned()));

        assert_eq!(parser.parse("a").unwrap(), "fallback");
    }

    #[test]
    fn generate_merges_diagnostics_across_multiple_failed_attempts() {
        let alt_body = generate(|| fail::<String>("first"))
            .or(generate(|| fail::<String>("second")));

        let err = alt_body.parse("").unwrap_err();
        assert_eq!(err.to_string(), "expected one of 'first', 'second' at 0:0");
    }
}
