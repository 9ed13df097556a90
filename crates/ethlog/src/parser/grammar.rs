//! Grammar — compiled `key=value` payload grammars on top of the ripgrep matcher.
//!
//! A grammar is an ordered list of slots. Adjacent pairs may be separated by
//! any run of spaces, since the upstream logger pads values for alignment.
//! Values are taken verbatim: hashes keep the logger's `…` abbreviation.

use std::num::ParseIntError;
use std::str::FromStr;
use grep_matcher::{Captures, Matcher};
use grep_regex::{RegexCaptures, RegexMatcher, RegexMatcherBuilder};

use super::model::{EventKind, ParseError};

/// One `key=value` pair of a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// ASCII decimal digits
    Number(&'static str),
    /// Any run of non-whitespace
    Token(&'static str),
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Number(key) | Slot::Token(key) => key,
        }
    }

    fn pattern(&self) -> String {
        match self {
            Slot::Number(key) => format!("{key}=(?P<{key}>[0-9]+)"),
            Slot::Token(key) => format!(r"{key}=(?P<{key}>\S+)"),
        }
    }
}

/// Compile a pattern with the settings every grammar in this crate shares.
pub(crate) fn compile(pattern: &str) -> Result<RegexMatcher, ParseError> {
    RegexMatcherBuilder::new()
        .case_insensitive(false)
        .multi_line(false)
        .build(pattern)
        .map_err(|e| ParseError::InvalidPattern(e.to_string()))
}

/// Run `matcher` over `text`, returning its captures on a match.
pub(crate) fn capture(matcher: &RegexMatcher, text: &str) -> Result<Option<RegexCaptures>, ParseError> {
    let mut caps = matcher
        .new_captures()
        .map_err(|e| ParseError::InvalidPattern(e.to_string()))?;

    let found = matcher.captures(text.as_bytes(), &mut caps).unwrap_or(false);
    Ok(found.then_some(caps))
}

/// Text of the named group, if it participated in the match.
pub(crate) fn named<'t>(
    matcher: &RegexMatcher,
    caps: &RegexCaptures,
    text: &'t str,
    name: &str,
) -> Option<&'t str> {
    let m = caps.get(matcher.capture_index(name)?)?;
    text.get(m.start()..m.end())
}

pub struct Grammar {
    kind: EventKind,
    slots: &'static [Slot],
    matcher: RegexMatcher,
}

impl Grammar {
    pub fn new(kind: EventKind, slots: &'static [Slot]) -> Result<Self, ParseError> {
        if slots.is_empty() {
            return Err(ParseError::InvalidPattern(format!("{kind}: at least one slot required")));
        }
        let matcher = compile(&Self::pattern_for(slots))?;

        Ok(Self { kind, slots, matcher })
    }

    fn pattern_for(slots: &[Slot]) -> String {
        let body = slots.iter().map(Slot::pattern).collect::<Vec<_>>().join(" +");
        // word boundary keeps `number=` from matching inside `blocknumber=`
        format!(r"\b{body}")
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Human-readable form used in diagnostics, e.g. `number=<n> hash=<s>`
    pub fn describe(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Number(key) => format!("{key}=<n>"),
                Slot::Token(key) => format!("{key}=<s>"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Match `payload` against the grammar.
    pub fn apply<'p>(&self, payload: &'p str) -> Result<Fields<'p, '_>, ParseError> {
        match capture(&self.matcher, payload)? {
            Some(caps) => Ok(Fields { grammar: self, payload, caps }),
            None => Err(self.diagnose(payload)),
        }
    }

    /// Work out which slot made the match fail so the error can name it.
    fn diagnose(&self, payload: &str) -> ParseError {
        let pairs: Vec<(&str, &str)> = payload
            .split_whitespace()
            .filter_map(|token| token.split_once('='))
            .collect();

        for slot in self.slots {
            let value = match pairs.iter().find(|(key, _)| *key == slot.key()) {
                Some((_, value)) => *value,
                None => {
                    return ParseError::MissingField {
                        kind: self.kind,
                        field: slot.key(),
                        payload: payload.to_string(),
                    }
                }
            };

            if let Slot::Number(field) = slot {
                if let Err(source) = value.parse::<u64>() {
                    return ParseError::InvalidNumber {
                        kind: self.kind,
                        field,
                        raw: value.to_string(),
                        source,
                    };
                }
            }
        }

        ParseError::GrammarMismatch {
            kind: self.kind,
            grammar: self.describe(),
            payload: payload.to_string(),
        }
    }
}

/// Captured values of one successful grammar match.
pub struct Fields<'p, 'g> {
    grammar: &'g Grammar,
    payload: &'p str,
    caps: RegexCaptures,
}

impl<'p> Fields<'p, '_> {
    pub fn token(&self, key: &'static str) -> Result<String, ParseError> {
        self.raw(key).map(str::to_string)
    }

    /// Parse a numeric slot into `T`; out-of-range values are errors, never wrapped.
    pub fn number<T>(&self, key: &'static str) -> Result<T, ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let raw = self.raw(key)?;
        raw.parse::<T>().map_err(|source| ParseError::InvalidNumber {
            kind: self.grammar.kind,
            field: key,
            raw: raw.to_string(),
            source,
        })
    }

    fn raw(&self, key: &'static str) -> Result<&'p str, ParseError> {
        named(&self.grammar.matcher, &self.caps, self.payload, key).ok_or_else(|| {
            ParseError::MissingField {
                kind: self.grammar.kind,
                field: key,
                payload: self.payload.to_string(),
            }
        })
    }
}
