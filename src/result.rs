////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! The parse result algebra: [`Success`], [`Failure`], and the
//! [`Diagnostics`] merge rule that makes alternation's error messages
//! informative.
////////////////////////////////////////////////////////////////////////////////

// Standard library imports.
use std::cmp::Ordering;
use std::collections::BTreeSet;


////////////////////////////////////////////////////////////////////////////////
// Diagnostics
////////////////////////////////////////////////////////////////////////////////
/// The furthest input index reached by any sub-parser consulted so far,
/// together with the set of labels describing what was expected there.
///
/// Every [`Success`] and [`Failure`] carries one of these, even on
/// success: an outer alternation needs a successful branch's
/// diagnostics so it can still report the most informative expectation
/// if a sibling branch fails further along.
///
/// `expected` is a `BTreeSet` rather than a `HashSet` so its iteration
/// order is already the lexicographically sorted order error rendering
/// requires; there is no separate sort step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// The furthest code point index reached.
    pub furthest: usize,
    /// The labels describing what would have let parsing continue at
    /// `furthest`.
    pub expected: BTreeSet<String>,
}

impl Diagnostics {
    /// Diagnostics for a parser that consulted no input at `at`.
    pub fn none(at: usize) -> Self {
        Diagnostics { furthest: at, expected: BTreeSet::new() }
    }

    /// Diagnostics for a single expectation at `at`.
    pub fn single(at: usize, label: impl Into<String>) -> Self {
        let mut expected = BTreeSet::new();
        expected.insert(label.into());
        Diagnostics { furthest: at, expected }
    }

    /// Merges two diagnostics per the furthest-progress rule: the pair
    /// with the greater `furthest` wins outright; on a tie, the
    /// `expected` sets are unioned.
    pub fn merge(self, other: Diagnostics) -> Diagnostics {
        match self.furthest.cmp(&other.furthest) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => {
                let mut expected = self.expected;
                expected.extend(other.expected);
                Diagnostics { furthest: self.furthest, expected }
            }
        }
    }
}


////////////////////////////////////////////////////////////////////////////////
// Success and Failure
////////////////////////////////////////////////////////////////////////////////
/// A successful parse attempt.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Success<O> {
    /// The code point index immediately after the parsed text.
    pub index: usize,
    /// The parsed value.
    pub value: O,
    /// Diagnostics accumulated while reaching this success.
    pub diagnostics: Diagnostics,
}

impl<O> Success<O> {
    /// Applies `f` to the parsed value, keeping the index and
    /// diagnostics.
    pub fn map_value<F, P>(self, f: F) -> Success<P>
        where F: FnOnce(O) -> P
    {
        Success { index: self.index, value: f(self.value), diagnostics: self.diagnostics }
    }
}

/// A failed parse attempt.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Failure {
    /// Diagnostics accumulated while reaching this failure.
    pub diagnostics: Diagnostics,
}

/// The result of one parse attempt: either a [`Success<O>`] or a
/// [`Failure`].
pub type Reply<O> = Result<Success<O>, Failure>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_greater_furthest() {
        let a = Diagnostics::single(3, "a");
        let b = Diagnostics::single(1, "b");
        let merged = a.merge(b);
        assert_eq!(merged.furthest, 3);
        assert!(merged.expected.contains("a"));
        assert!(!merged.expected.contains("b"));
    }

    #[test]
    fn merge_unions_on_tie() {
        let a = Diagnostics::single(2, "a");
        let b = Diagnostics::single(2, "b");
        let merged = a.merge(b);
        assert_eq!(merged.furthest, 2);
        assert!(merged.expected.contains("a"));
        assert!(merged.expected.contains("b"));
    }
}
