////////////////////////////////////////////////////////////////////////////////
// parsekit parser combinator engine
////////////////////////////////////////////////////////////////////////////////
// Copyright 2020 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Primitive parsers: literal and regex text matching, single
//! code-point predicates, and the always-succeed/always-fail parsers.
////////////////////////////////////////////////////////////////////////////////

// Local imports.
use crate::combinators::alt;
use crate::parser::Parser;
use crate::result::{Diagnostics, Failure, Success};

// External library imports.
use regex::Regex;


////////////////////////////////////////////////////////////////////////////////
// string
////////////////////////////////////////////////////////////////////////////////
/// Returns a parser which matches the literal text `expect`.
///
/// On success the matched text is returned verbatim; on failure the
/// expected label is `expect` itself and the index is unchanged.
pub fn string(expect: impl Into<String>) -> Parser<String> {
    let expect = expect.into();
    Parser::new(move |input, index| {
        if input.slice_from(index).starts_with(expect.as_str()) {
            let end = index + expect.chars().count();
            Ok(Success {
                index: end,
                value: expect.clone(),
                diagnostics: Diagnostics::single(end, expect.clone()),
            })
        } else {
            Err(Failure { diagnostics: Diagnostics::single(index, expect.clone()) })
        }
    })
}


////////////////////////////////////////////////////////////////////////////////
// regex
////////////////////////////////////////////////////////////////////////////////
/// Returns a parser which matches `pattern`, anchored at the current
/// index, delegating to the host regex engine as a black-box matcher.
///
/// On a match, the matched text is consumed and returned; on failure
/// the expected label is the pattern text itself.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression. Parsers are
/// built once from literal grammars, so an invalid pattern is a
/// programmer error caught immediately rather than deferred to parse
/// time.
pub fn regex(pattern: impl AsRef<str>) -> Parser<String> {
    let pattern = pattern.as_ref();
    let label = pattern.to_owned();
    let anchored = Regex::new(&format!("^(?:{})", pattern))
        .unwrap_or_else(|err| panic!("regex: invalid pattern {:?}: {}", pattern, err));

    Parser::new(move |input, index| {
        match anchored.find(input.slice_from(index)) {
            Some(found) => {
                let text = found.as_str().to_owned();
                let end = index + text.chars().count();
                Ok(Success {
                    index: end,
                    value: text,
                    diagnostics: Diagnostics::single(end, label.clone()),
                })
            }
            None => Err(Failure { diagnostics: Diagnostics::single(index, label.clone()) }),
        }
    })
}


////////////////////////////////////////////////////////////////////////////////
// test_char
////////////////////////////////////////////////////////////////////////////////
/// Returns a parser which matches a single code point satisfying
/// `predicate`, described by `label` on failure.
pub fn test_char<F>(predicate: F, label: impl Into<String>) -> Parser<String>
    where F: Fn(char) -> bool + 'static
{
    let label = label.into();
    Parser::new(move |input, index| {
        match input.char_at(index) {
            Some(c) if predicate(c) => {
                let end = index + 1;
                Ok(Success {
                    index: end,
                    value: c.to_string(),
                    diagnostics: Diagnostics::single(end, label.clone()),
                })
            }
            _ => Err(Failure { diagnostics: Diagnostics::single(index, label.clone()) }),
        }
    })
}

/// A parser which matches any single code point.
pub fn any_char() -> Parser<String> {
    test_char(|_| true, "any character")
}

/// Returns a parser which matches any single code point present in
/// `chars`, labeled as the bracketed set `[chars]`.
pub fn char_from(chars: impl Into<String>) -> Parser<String> {
    let chars = chars.into();
    let label = format!("[{}]", chars);
    test_char(move |c| chars.contains(c), label)
}


////////////////////////////////////////////////////////////////////////////////
// string_from
////////////////////////////////////////////////////////////////////////////////
/// Returns a parser which matches any one of `strings`, trying longer
/// alternatives first so that a prefix (`"Mr"`) does not shadow a
/// longer alternative that starts with it (`"Mr."`).
pub fn string_from(strings: &[&str]) -> Parser<String> {
    let mut sorted: Vec<&str> = strings.to_vec();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    alt(sorted.into_iter().map(string).collect())
}


////////////////////////////////////////////////////////////////////////////////
// success and fail
////////////////////////////////////////////////////////////////////////////////
/// Returns a parser which always succeeds with `value`, without
/// consuming input or consulting the input at all.
pub fn success<O: Clone + 'static>(value: O) -> Parser<O> {
    Parser::new(move |_input, index| Ok(Success {
        index,
        value: value.clone(),
        diagnostics: Diagnostics::none(index),
    }))
}

/// Returns a parser which always fails, expecting `label`.
pub fn fail<O: 'static>(label: impl Into<String>) -> Parser<O> {
    let label = label.into();
    Parser::new(move |_input, index| {
        Err(Failure { diagnostics: Diagnostics::single(index, label.clone()) })
    })
}


////////////////////////////////////////////////////////////////////////////////
// eof
////////////////////////////////////////////////////////////////////////////////
/// A parser which succeeds, consuming nothing, only at end-of-input.
pub fn eof() -> Parser<()> {
    Parser::new(|input, index| {
        if index == input.len() {
            Ok(Success { index, value: (), diagnostics: Diagnostics::none(index) })
        } else {
            Err(Failure { diagnostics: Diagnostics::single(index, "EOF") })
        }
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_matches_exact_literal() {
        assert_eq!(string("x").parse("x").unwrap(), "x");
        let err = string("x").parse("y").unwrap_err();
        assert_eq!(err.index, 0);
        assert!(err.expected.contains("x"));
    }

    #[test]
    fn regex_matches_anchored_pattern() {
        let digit = regex(r"[0-9]");
        assert_eq!(digit.parse("1").unwrap(), "1");
        assert_eq!(digit.parse("4").unwrap(), "4");
        assert!(digit.parse("x").is_err());
    }

    #[test]
    fn test_char_reports_label_on_failure() {
        let ascii = test_char(|c| (c as u32) < 128, "ascii character");
        assert_eq!(ascii.parse("a").unwrap(), "a");
        assert_eq!(ascii.parse("\u{263a}").unwrap_err().to_string(),
            "expected 'ascii character' at 0:0");
        assert_eq!(ascii.parse("").unwrap_err().to_string(),
            "expected 'ascii character' at 0:0");
    }

    #[test]
    fn char_from_renders_bracketed_label() {
        let ab = char_from("ab");
        assert_eq!(ab.parse("a").unwrap(), "a");
        assert_eq!(ab.parse("b").unwrap(), "b");
        assert_eq!(ab.parse("x").unwrap_err().to_string(), "expected '[ab]' at 0:0");
    }

    #[test]
    fn string_from_prefers_longer_alternatives() {
        let titles = string_from(&["Mr", "Mr.", "Mrs", "Mrs."]);
        assert_eq!(titles.parse("Mr").unwrap(), "Mr");
        assert_eq!(titles.parse("Mr.").unwrap(), "Mr.");
        assert_eq!(titles.parse("foo").unwrap_err().to_string(),
            "expected one of 'Mr', 'Mr.', 'Mrs', 'Mrs.' at 0:0");
    }

    #[test]
    fn any_char_requires_one_code_point() {
        assert_eq!(any_char().parse("x").unwrap(), "x");
        assert_eq!(any_char().parse("\n").unwrap(), "\n");
        assert!(any_char().parse("").is_err());
    }
}
