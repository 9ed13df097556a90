use grep_regex::RegexMatcher;

use super::grammar::{capture, compile, named};
use super::model::{Columns, ParseError};
use super::LABEL_WIDTH;

/// Splits a raw line into `(header, label, payload)`.
///
/// Layout: the shortest prefix ending in `]`, one space, a message field of
/// at most `LABEL_WIDTH` characters, then optionally one space and the rest
/// of the line.
pub struct ColumnSplitter {
    matcher: RegexMatcher,
}

impl ColumnSplitter {
    pub fn new() -> Result<Self, ParseError> {
        let pattern = format!(
            r"^(?P<header>.+?\]) (?P<label>.{{1,{LABEL_WIDTH}}})(?: (?P<payload>.*))?$"
        );
        Ok(Self { matcher: compile(&pattern)? })
    }

    /// Returns `None` when the line does not have the three-column shape.
    pub fn split<'a>(&self, line: &'a str) -> Option<Columns<'a>> {
        let caps = capture(&self.matcher, line).ok().flatten()?;

        Some(Columns {
            header: named(&self.matcher, &caps, line, "header")?,
            label: named(&self.matcher, &caps, line, "label")?,
            payload: named(&self.matcher, &caps, line, "payload"),
        })
    }
}
