use crate::parser::grammar::{Grammar, Slot};
use crate::parser::model::MinedBlockEvent;
use crate::parser::traits::*;

const GRAMMAR: &[Slot] = &[Slot::Number("number"), Slot::Token("hash")];

/// `🔨 mined potential block   number=10 hash=75d8ad…0f4a6c`
pub struct MinedBlockExtractor {
    grammar: Grammar,
}

impl MinedBlockExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::MinedBlock, GRAMMAR)? })
    }
}

impl EventExtractor for MinedBlockExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::MinedBlock(MinedBlockEvent {
            number: fields.number("number")?,
            hash: fields.token("hash")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::MinedBlock
    }
}
