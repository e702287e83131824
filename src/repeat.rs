////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Repetition combinators: bounded repeat (`times`, `times_range`,
//! `many`, `at_most`, `at_least`) and separated repetition (`sep_by`).
////////////////////////////////////////////////////////////////////////////////

// Local imports.
use crate::parser::Parser;
use crate::result::{Diagnostics, Failure, Success};


impl<O: 'static> Parser<O> {
    /// Repeats this parser exactly `n` times, collecting the values into
    /// a `Vec`. Equivalent to `self.times_range(n, Some(n))`.
    pub fn times(self, n: usize) -> Parser<Vec<O>> {
        self.times_range(n, Some(n))
    }

    /// Repeats this parser between `min` and `max` (exclusive) times.
    ///
    /// The first `min` repetitions must all succeed, failing the whole
    /// repeat (with merged diagnostics) if any does not. After that, up
    /// to `max - min` further repetitions are attempted; the first
    /// failure among them stops the repeat successfully, but its
    /// diagnostics are still merged in, so a longer match's
    /// requirements are not lost from the error report.
    ///
    /// `max = None` means unbounded (this is how [`many`](Parser::many)
    /// and [`at_least`](Parser::at_least) are defined).
    pub fn times_range(self, min: usize, max: Option<usize>) -> Parser<Vec<O>> {
        Parser::new(move |input, index| {
            let span = tracing::debug_span!("times_range", min, ?max);
            let _enter = span.enter();

            let mut values = Vec::new();
            let mut position = index;
            let mut diagnostics = Diagnostics::none(index);

            for _ in 0..min {
                match self.run(input, position) {
                    Ok(success) => {
                        diagnostics = diagnostics.merge(success.diagnostics);
                        position = success.index;
                        values.push(success.value);
                    }
                    Err(failure) => {
                        tracing::trace!(count = values.len(), "required repetition failed");
                        return Err(Failure { diagnostics: diagnostics.merge(failure.diagnostics) });
                    }
                }
            }

            loop {
                if let Some(max) = max {
                    if values.len() >= max {
                        break;
                    }
                }
                match self.run(input, position) {
                    Ok(success) => {
                        diagnostics = diagnostics.merge(success.diagnostics);
                        position = success.index;
                        values.push(success.value);
                        tracing::trace!(count = values.len(), "optional repetition succeeded");
                    }
                    Err(failure) => {
                        diagnostics = diagnostics.merge(failure.diagnostics);
                        tracing::trace!(count = values.len(), "optional repetition stopped");
                        break;
                    }
                }
            }

            Ok(Success { index: position, value: values, diagnostics })
        })
    }

    /// Repeats this parser zero or more times. Equivalent to
    /// `self.times_range(0, None)`.
    pub fn many(self) -> Parser<Vec<O>> {
        self.times_range(0, None)
    }

    /// Repeats this parser at most `n` times. Equivalent to
    /// `self.times_range(0, Some(n))`.
    pub fn at_most(self, n: usize) -> Parser<Vec<O>> {
        self.times_range(0, Some(n))
    }

    /// Repeats this parser at least `n` times. Equivalent to
    /// `self.times_range(n, None)`.
    pub fn at_least(self, n: usize) -> Parser<Vec<O>> {
        self.times_range(n, None)
    }

    /// Parses `self (sep self)*`, with the total count of `self`
    /// matches constrained to `[min, max)`.
    ///
    /// Unlike [`times_range`](Parser::times_range), a separator failure
    /// after at least one successful match simply stops the repeat
    /// (trailing separators are never consumed); but once a separator
    /// *has* matched, the following `self` is required — a separator
    /// with no item after it fails the whole parse rather than silently
    /// dropping the dangling separator.
    ///
    /// `max = Some(0)` succeeds immediately with an empty `Vec` without
    /// consulting the input at all.
    pub fn sep_by<S: 'static>(self, sep: Parser<S>, min: usize, max: Option<usize>) -> Parser<Vec<O>> {
        Parser::new(move |input, index| {
            let span = tracing::debug_span!("sep_by", min, ?max);
            let _enter = span.enter();

            if max == Some(0) {
                return Ok(Success { index, value: Vec::new(), diagnostics: Diagnostics::none(index) });
            }

            let mut values = Vec::new();
            let mut position = index;
            let mut diagnostics = Diagnostics::none(index);

            match self.run(input, position) {
                Ok(success) => {
                    diagnostics = diagnostics.merge(success.diagnostics);
                    position = success.index;
                    values.push(success.value);
                }
                Err(failure) => {
                    diagnostics = diagnostics.merge(failure.diagnostics);
                    return if min == 0 {
                        Ok(Success { index: position, value: values, diagnostics })
                    } else {
                        Err(Failure { diagnostics })
                    };
                }
            }

            loop {
                if let Some(max) = max {
                    if values.len() >= max {
                        break;
                    }
                }

                match sep.run(input, position) {
                    Ok(sep_success) => {
                        let after_sep = diagnostics.clone().merge(sep_success.diagnostics);
                        match self.run(input, sep_success.index) {
                            Ok(item_success) => {
                                diagnostics = after_sep.merge(item_success.diagnostics);
                                position = item_success.index;
                                values.push(item_success.value);
                            }
                            Err(item_failure) => {
                                tracing::trace!("separator matched but following item failed");
                                return Err(Failure {
                                    diagnostics: after_sep.merge(item_failure.diagnostics),
                                });
                            }
                        }
                    }
                    Err(sep_failure) => {
                        diagnostics = diagnostics.merge(sep_failure.diagnostics);
                        break;
                    }
                }
            }

            if values.len() < min {
                Err(Failure { diagnostics })
            } else {
                Ok(Success { index: position, value: values, diagnostics })
            }
        })
    }
}


#[cfg(test)]
mod tests {
    use crate::classes::{digit, letter};
    use crate::primitive::string;

    #[test]
    fn many_matches_zero_or_more() {
        let letters = letter().many();
        assert_eq!(letters.parse("x").unwrap(), vec!["x"]);
        assert_eq!(letters.parse("xyz").unwrap(), vec!["x", "y", "z"]);
        assert_eq!(letters.parse("").unwrap(), Vec::<String>::new());
        assert!(letters.parse("1").is_err());
    }

    #[test]
    fn times_requires_exact_count() {
        let three = letter().times(3);
        assert_eq!(three.parse("xyz").unwrap(), vec!["x", "y", "z"]);
        assert!(three.parse("xy").is_err());
        assert!(three.parse("xyzw").is_err());
    }

    #[test]
    fn times_range_respects_bounds() {
        let some = letter().times_range(2, Some(4));
        assert_eq!(some.parse("xy").unwrap(), vec!["x", "y"]);
        assert_eq!(some.parse("xyzw").unwrap(), vec!["x", "y", "z", "w"]);
        assert!(some.parse("x").is_err());
        assert!(some.parse("xyzwv").is_err());
    }

    #[test]
    fn at_most_bounds_the_upper_count() {
        let ab = string("ab");
        assert_eq!(ab.clone().at_most(2).parse("").unwrap(), Vec::<String>::new());
        assert_eq!(ab.clone().at_most(2).parse("ab").unwrap(), vec!["ab"]);
        assert_eq!(ab.clone().at_most(2).parse("abab").unwrap(), vec!["ab", "ab"]);
        assert!(ab.at_most(2).parse("ababab").is_err());
    }

    #[test]
    fn sep_by_parses_separated_items() {
        let digits = digit().map(|d| d.parse::<i32>().unwrap()).sep_by(string(","), 0, None);
        assert_eq!(digits.parse("1,2,3,4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(digits.parse("8").unwrap(), vec![8]);
        assert_eq!(digits.parse("").unwrap(), Vec::<i32>::new());

        assert!(digits.parse("8,").is_err());
        assert!(digits.parse(",9").is_err());
        assert!(digits.parse("82").is_err());
        assert!(digits.parse("7.6").is_err());
    }

    #[test]
    fn sep_by_enforces_min_and_max() {
        let digits = digit().map(|d| d.parse::<i32>().unwrap()).sep_by(string(","), 2, Some(4));
        assert_eq!(digits.parse("1,2,3,4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(digits.parse("3,7").unwrap(), vec![3, 7]);
        assert!(digits.parse("8").is_err());
        assert!(digits.parse("").is_err());

        let empty_on_zero_max = digit().sep_by(string(","), 0, Some(0));
        assert_eq!(empty_on_zero_max.parse("").unwrap(), Vec::<String>::new());
    }
}
