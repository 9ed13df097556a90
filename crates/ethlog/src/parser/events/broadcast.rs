use crate::parser::grammar::{Grammar, Slot};
use crate::parser::model::BroadcastEvent;
use crate::parser::traits::*;

const GRAMMAR: &[Slot] = &[
    Slot::Token("hash"),
    Slot::Number("recipients"),
    Slot::Token("duration"),
];

/// Broadcast summaries: `hash=75d8ad…0f4a6c recipients=3 duration=2562047h47m16.854s`
///
/// `Propagated block` and `Announced block` log the same fields, so one
/// extractor serves both and only the produced variant differs.
pub struct BroadcastExtractor {
    grammar: Grammar,
}

impl BroadcastExtractor {
    pub fn propagated() -> Result<Self, ParseError> {
        Self::for_kind(EventKind::PropagatedBlockBroadcast)
    }

    pub fn announced() -> Result<Self, ParseError> {
        Self::for_kind(EventKind::AnnouncedBlockBroadcast)
    }

    fn for_kind(kind: EventKind) -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(kind, GRAMMAR)? })
    }
}

impl EventExtractor for BroadcastExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;
        let event = BroadcastEvent {
            hash: fields.token("hash")?,
            recipients: fields.number("recipients")?,
            duration: fields.token("duration")?,
        };

        match self.grammar.kind() {
            EventKind::PropagatedBlockBroadcast => Ok(EventRecord::PropagatedBlockBroadcast(event)),
            EventKind::AnnouncedBlockBroadcast => Ok(EventRecord::AnnouncedBlockBroadcast(event)),
            other => Err(ParseError::Unsupported(other)),
        }
    }

    fn kind(&self) -> EventKind {
        self.grammar.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "hash=75d8ad…0f4a6c recipients=3 duration=2562047h47m16.854s";

    fn expected() -> BroadcastEvent {
        BroadcastEvent {
            hash: "75d8ad…0f4a6c".to_string(),
            recipients: 3,
            duration: "2562047h47m16.854s".to_string(),
        }
    }

    #[test]
    fn test_propagated_summary() {
        let extractor = BroadcastExtractor::propagated().unwrap();
        assert_eq!(extractor.kind(), EventKind::PropagatedBlockBroadcast);
        assert_eq!(
            extractor.extract(PAYLOAD).unwrap(),
            EventRecord::PropagatedBlockBroadcast(expected())
        );
    }

    #[test]
    fn test_announced_summary() {
        let extractor = BroadcastExtractor::announced().unwrap();
        assert_eq!(extractor.kind(), EventKind::AnnouncedBlockBroadcast);
        assert_eq!(
            extractor.extract(PAYLOAD).unwrap(),
            EventRecord::AnnouncedBlockBroadcast(expected())
        );
    }

    #[test]
    fn test_duration_kept_verbatim() {
        let extractor = BroadcastExtractor::announced().unwrap();
        let record = extractor
            .extract("hash=ab recipients=12    duration=651.016µs")
            .unwrap();

        match record {
            EventRecord::AnnouncedBlockBroadcast(e) => {
                assert_eq!(e.recipients, 12);
                assert_eq!(e.duration, "651.016µs");
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[test]
    fn test_negative_recipients_rejected() {
        let extractor = BroadcastExtractor::propagated().unwrap();
        let err = extractor
            .extract("hash=ab recipients=-3 duration=1s")
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "recipients", .. }));
    }
}
