////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Variadic combinators (`seq`, `alt`, `combine`) and the operator
//! surface (`|`, `>>`, `<<`, `+`, `*`) built on top of [`Parser`].
////////////////////////////////////////////////////////////////////////////////

// Local imports.
use crate::parser::Parser;
use crate::result::{Diagnostics, Failure, Success};

// Standard library imports.
use std::ops::{Add, BitOr, Mul, Range, Shl, Shr};


////////////////////////////////////////////////////////////////////////////////
// alt
////////////////////////////////////////////////////////////////////////////////
/// Generalizes [`Parser::or`] left-to-right over any number of
/// alternatives. `alt(Vec::new())` always fails with an empty expected
/// set, since there is no alternative left to describe.
pub fn alt<O: 'static>(parsers: Vec<Parser<O>>) -> Parser<O> {
    tracing::trace!(branches = parsers.len(), "building alt combinator");

    let base: Parser<O> = Parser::new(|_input, index| {
        Err(Failure { diagnostics: Diagnostics::none(index) })
    });

    // Each fold step is a `Parser::or`, which is already instrumented
    // per invocation, so `alt` itself needs no additional run-time span.
    parsers.into_iter().fold(base, Parser::or)
}


////////////////////////////////////////////////////////////////////////////////
// seq
////////////////////////////////////////////////////////////////////////////////
/// Runs each of `parsers` in order, threading the index and collecting
/// their values into an ordered `Vec`. Diagnostics merge across every
/// attempt, including the one that fails (if any). `seq(Vec::new())`
/// succeeds immediately with an empty `Vec`.
///
/// `seq` only supports the uniformly-typed case (every parser produces
/// the same `O`); heterogeneous sequencing is expressed with nested
/// [`Parser::then`]/[`Parser::bind`] calls or the `generate!` macro
/// instead.
pub fn seq<O: 'static>(parsers: Vec<Parser<O>>) -> Parser<Vec<O>> {
    Parser::new(move |input, index| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut position = index;
        let mut diagnostics = Diagnostics::none(index);

        for parser in &parsers {
            match parser.run(input, position) {
                Ok(success) => {
                    diagnostics = diagnostics.merge(success.diagnostics);
                    position = success.index;
                    values.push(success.value);
                }
                Err(failure) => {
                    return Err(Failure { diagnostics: diagnostics.merge(failure.diagnostics) });
                }
            }
        }

        Ok(Success { index: position, value: values, diagnostics })
    })
}


////////////////////////////////////////////////////////////////////////////////
// combine
////////////////////////////////////////////////////////////////////////////////
impl<O: 'static> Parser<Vec<O>> {
    /// Unpacks a sequence's elements as positional arguments to `f`.
    ///
    /// Equivalent to `self.map(|xs| f(*xs))` in a dynamically typed
    /// host; here the arity `N` is fixed by `f`'s array parameter, so
    /// `seq(a, b).combine(|[x, y]| ...)` reads as the positional form
    /// the surface grammar describes while staying fully type-checked.
    ///
    /// # Panics
    ///
    /// Panics if the sequence does not have exactly `N` elements. Every
    /// caller of `combine` pairs it with a `seq` built from exactly `N`
    /// parsers, so a mismatch indicates a grammar bug, not a parse
    /// failure.
    pub fn combine<F, R, const N: usize>(self, f: F) -> Parser<R>
        where
            F: Fn([O; N]) -> R + 'static,
            R: 'static,
    {
        self.map(move |values: Vec<O>| {
            let len = values.len();
            let array: [O; N] = values.try_into().unwrap_or_else(|_| {
                panic!("combine: expected exactly {} elements, found {}", N, len)
            });
            f(array)
        })
    }
}


////////////////////////////////////////////////////////////////////////////////
// Concatenate
////////////////////////////////////////////////////////////////////////////////
/// Values that can be joined end-to-end, backing the `+` operator.
pub trait Concatenate {
    /// Joins `self` followed by `other`.
    fn concatenate(self, other: Self) -> Self;
}

impl Concatenate for String {
    fn concatenate(mut self, other: String) -> String {
        self.push_str(&other);
        self
    }
}

impl<T> Concatenate for Vec<T> {
    fn concatenate(mut self, mut other: Vec<T>) -> Vec<T> {
        self.append(&mut other);
        self
    }
}


////////////////////////////////////////////////////////////////////////////////
// Operator surface
////////////////////////////////////////////////////////////////////////////////
/// `a | b` — [`Parser::or`].
impl<O: 'static> BitOr for Parser<O> {
    type Output = Parser<O>;
    fn bitor(self, rhs: Parser<O>) -> Parser<O> {
        self.or(rhs)
    }
}

/// `a >> b` — [`Parser::then`].
impl<O: 'static, P: 'static> Shr<Parser<P>> for Parser<O> {
    type Output = Parser<P>;
    fn shr(self, rhs: Parser<P>) -> Parser<P> {
        self.then(rhs)
    }
}

/// `a << b` — [`Parser::skip`].
impl<O: 'static, P: 'static> Shl<Parser<P>> for Parser<O> {
    type Output = Parser<O>;
    fn shl(self, rhs: Parser<P>) -> Parser<O> {
        self.skip(rhs)
    }
}

/// `a + b` — concatenation of string or sequence values:
/// `seq(a, b).combine(|[x, y]| x.concatenate(y))`.
impl<O: Concatenate + 'static> Add for Parser<O> {
    type Output = Parser<O>;
    fn add(self, rhs: Parser<O>) -> Parser<O> {
        seq(vec![self, rhs]).combine(|[a, b]: [O; 2]| a.concatenate(b))
    }
}

/// `a * n` — exactly `n` repetitions: [`Parser::times`](crate::Parser::times).
impl<O: 'static> Mul<usize> for Parser<O> {
    type Output = Parser<Vec<O>>;
    fn mul(self, n: usize) -> Parser<Vec<O>> {
        self.times(n)
    }
}

/// `a * (lo..hi)` — between `lo` and `hi` (exclusive) repetitions:
/// [`Parser::times_range`](crate::Parser::times_range).
impl<O: 'static> Mul<Range<usize>> for Parser<O> {
    type Output = Parser<Vec<O>>;
    fn mul(self, range: Range<usize>) -> Parser<Vec<O>> {
        self.times_range(range.start, Some(range.end))
    }
}
