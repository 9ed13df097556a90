use crate::parser::grammar::{Grammar, Slot};
use crate::parser::model::{ImportingBlockEvent, QueuedBlockEvent};
use crate::parser::traits::*;

const QUEUED: &[Slot] = &[
    Slot::Token("peer"),
    Slot::Number("number"),
    Slot::Token("hash"),
    Slot::Number("queued"),
];

const IMPORTING: &[Slot] = &[
    Slot::Token("peer"),
    Slot::Number("number"),
    Slot::Token("hash"),
];

/// `peer=d9c2b87e4525fab9 number=10 hash=75d8ad…0f4a6c queued=1`
pub struct QueuedBlockExtractor {
    grammar: Grammar,
}

impl QueuedBlockExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::QueuedPropagatedBlock, QUEUED)? })
    }
}

impl EventExtractor for QueuedBlockExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::QueuedPropagatedBlock(QueuedBlockEvent {
            peer: fields.token("peer")?,
            number: fields.number("number")?,
            hash: fields.token("hash")?,
            queued: fields.number("queued")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::QueuedPropagatedBlock
    }
}

/// `peer=d9c2b87e4525fab9 number=10 hash=75d8ad…0f4a6c`
pub struct ImportingBlockExtractor {
    grammar: Grammar,
}

impl ImportingBlockExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::ImportingPropagatedBlock, IMPORTING)? })
    }
}

impl EventExtractor for ImportingBlockExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::ImportingPropagatedBlock(ImportingBlockEvent {
            peer: fields.token("peer")?,
            number: fields.number("number")?,
            hash: fields.token("hash")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::ImportingPropagatedBlock
    }
}
