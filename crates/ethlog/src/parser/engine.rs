use std::collections::HashMap;

use super::classifier::EventClassifier;
use super::columns::ColumnSplitter;
use super::events;
use super::header::HeaderParser;
use super::model::{EventKind, EventRecord, Header, ParseError};
use super::traits::EventExtractor;
use super::MAX_LINE_SIZE;

/// A recognised line: its header, the verbatim message label and the typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub header: Header,
    pub label: &'a str,
    pub record: EventRecord,
}

impl ParsedLine<'_> {
    pub fn kind(&self) -> EventKind {
        self.record.kind()
    }
}

/// Line pipeline: split → classify → extract + header.
///
/// Holds only compiled grammars, so one instance can be shared across
/// threads and reused for any number of lines.
pub struct LineParser {
    splitter: ColumnSplitter,
    header: HeaderParser,
    classifier: EventClassifier,
    extractors: HashMap<EventKind, Box<dyn EventExtractor>>,
}

impl LineParser {
    pub fn new() -> Result<Self, ParseError> {
        let extractors = events::all()?
            .into_iter()
            .map(|extractor| (extractor.kind(), extractor))
            .collect();

        Ok(Self {
            splitter: ColumnSplitter::new()?,
            header: HeaderParser::new()?,
            classifier: EventClassifier::new(),
            extractors,
        })
    }

    /// Classify without extracting. Never fails.
    pub fn classify(&self, line: &str) -> EventKind {
        self.splitter
            .split(line)
            .map_or(EventKind::Unknown, |columns| self.classifier.classify(&columns))
    }

    /// Parse one line.
    ///
    /// `Ok(None)` is a soft miss (unrecognised line, emit nothing); any `Err`
    /// is a hard failure for the run.
    pub fn parse<'a>(&self, line: &'a str) -> Result<Option<ParsedLine<'a>>, ParseError> {
        if line.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(line.len(), MAX_LINE_SIZE));
        }

        let Some(columns) = self.splitter.split(line) else {
            return Ok(None);
        };

        let kind = self.classifier.classify(&columns);
        if kind == EventKind::Unknown {
            return Ok(None);
        }

        let extractor = self
            .extractors
            .get(&kind)
            .ok_or(ParseError::Unsupported(kind))?;

        let record = extractor.extract(columns.payload.unwrap_or_default())?;
        let header = self.header.parse(columns.header)?;

        Ok(Some(ParsedLine {
            header,
            label: columns.label,
            record,
        }))
    }
}
