//! Record — output record assembly and delimited rendering.
//!
//! One recognised line becomes one record:
//! `timestamp;source;event type;block number;hash`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::ParsedLine;

/// `MM-DD-HH:MM:SS.mmm`
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%H:%M:%S%.3f";
/// Block number column for events that do not log one
pub const NO_BLOCK_NUMBER: i64 = -1;
pub const DEFAULT_DELIMITER: char = ';';

/// What goes in the event-type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTypeColumn {
    /// The message label exactly as logged, padding included
    #[default]
    Label,
    /// `EventKind::code()`
    Code,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{field} value {value:?} contains the field delimiter {delimiter:?}")]
    DelimiterInField {
        field: &'static str,
        value: String,
        delimiter: char,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub timestamp: String,
    pub source: String,
    pub event_type: String,
    pub block_number: i64,
    pub hash: String,
}

impl OutputRecord {
    pub const FIELD_NAMES: [&'static str; 5] = ["timestamp", "source", "event_type", "block_number", "hash"];

    pub fn fields(&self) -> [String; 5] {
        [
            self.timestamp.clone(),
            self.source.clone(),
            self.event_type.clone(),
            self.block_number.to_string(),
            self.hash.clone(),
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecordFormatter {
    delimiter: char,
    event_type: EventTypeColumn,
}

impl RecordFormatter {
    pub fn new(delimiter: char, event_type: EventTypeColumn) -> Self {
        Self { delimiter, event_type }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Assemble the record for `parsed`; `source` is supplied by the caller.
    pub fn record(&self, parsed: &ParsedLine<'_>, source: &str) -> OutputRecord {
        let event_type = match self.event_type {
            EventTypeColumn::Label => parsed.label.to_string(),
            EventTypeColumn::Code => parsed.kind().code().to_string(),
        };

        OutputRecord {
            timestamp: parsed.header.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            source: source.to_string(),
            event_type,
            block_number: parsed
                .record
                .block_number()
                .map_or(NO_BLOCK_NUMBER, i64::from),
            hash: parsed.record.hash().to_string(),
        }
    }

    /// Render one newline-terminated line. No escaping is done, so a value
    /// containing the delimiter is refused.
    pub fn render(&self, record: &OutputRecord) -> Result<String, RecordError> {
        let fields = record.fields();

        for (name, value) in OutputRecord::FIELD_NAMES.iter().zip(fields.iter()) {
            if value.contains(self.delimiter) {
                return Err(RecordError::DelimiterInField {
                    field: name,
                    value: value.clone(),
                    delimiter: self.delimiter,
                });
            }
        }

        let mut line = fields.join(self.delimiter.to_string().as_str());
        line.push('\n');
        Ok(line)
    }

    pub fn format_line(&self, parsed: &ParsedLine<'_>, source: &str) -> Result<String, RecordError> {
        self.render(&self.record(parsed, source))
    }
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, EventTypeColumn::default())
    }
}
