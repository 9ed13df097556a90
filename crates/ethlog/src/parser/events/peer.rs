use crate::parser::grammar::{Grammar, Slot};
use crate::parser::model::{AnnouncedPeerEvent, PropagatedPeerEvent};
use crate::parser::traits::*;

const PROPAGATED: &[Slot] = &[
    Slot::Token("id"),
    Slot::Token("conn"),
    Slot::Number("number"),
    Slot::Token("hash"),
    Slot::Number("td"),
];

const ANNOUNCED: &[Slot] = &[
    Slot::Token("id"),
    Slot::Token("conn"),
    Slot::Number("number"),
    Slot::Token("hash"),
];

/// `id=d9c2b87e4525fab9 conn=inbound number=10 hash=75d8ad…0f4a6c td=1444032`
pub struct PropagatedPeerExtractor {
    grammar: Grammar,
}

impl PropagatedPeerExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::PropagatedBlockPeer, PROPAGATED)? })
    }
}

impl EventExtractor for PropagatedPeerExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::PropagatedBlockPeer(PropagatedPeerEvent {
            id: fields.token("id")?,
            conn: fields.token("conn")?,
            number: fields.number("number")?,
            hash: fields.token("hash")?,
            td: fields.number("td")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::PropagatedBlockPeer
    }
}

/// `id=c465b03a2b2aee96 conn=inbound number=10 hash=75d8ad…0f4a6c`
pub struct AnnouncedPeerExtractor {
    grammar: Grammar,
}

impl AnnouncedPeerExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::AnnouncedBlockPeer, ANNOUNCED)? })
    }
}

impl EventExtractor for AnnouncedPeerExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::AnnouncedBlockPeer(AnnouncedPeerEvent {
            id: fields.token("id")?,
            conn: fields.token("conn")?,
            number: fields.number("number")?,
            hash: fields.token("hash")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::AnnouncedBlockPeer
    }
}
