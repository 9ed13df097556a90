use crate::parser::grammar::{Grammar, Slot};
use crate::parser::model::{ChainSplitEvent, ForkedBlockEvent};
use crate::parser::traits::*;

const FORKED: &[Slot] = &[
    Slot::Number("number"),
    Slot::Token("hash"),
    Slot::Number("diff"),
    Slot::Token("elapsed"),
    Slot::Number("txs"),
    Slot::Number("gas"),
    Slot::Number("uncles"),
];

const SPLIT: &[Slot] = &[
    Slot::Number("number"),
    Slot::Token("hash"),
    Slot::Number("drop"),
    Slot::Token("dropfrom"),
    Slot::Number("add"),
    Slot::Token("addfrom"),
];

/// `number=1  hash=e68e79…6f23a5 diff=131072 elapsed=651.016µs txs=0 gas=0 uncles=0`
pub struct ForkedBlockExtractor {
    grammar: Grammar,
}

impl ForkedBlockExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::InsertedForkedBlock, FORKED)? })
    }
}

impl EventExtractor for ForkedBlockExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::InsertedForkedBlock(ForkedBlockEvent {
            number: fields.number("number")?,
            hash: fields.token("hash")?,
            diff: fields.number("diff")?,
            elapsed: fields.token("elapsed")?,
            txs: fields.number("txs")?,
            gas: fields.number("gas")?,
            uncles: fields.number("uncles")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::InsertedForkedBlock
    }
}

/// `number=278 hash=75e1fa…a7ee0d drop=1 dropfrom=b1ad02…79f8fb add=1 addfrom=f692d6…226951`
pub struct ChainSplitExtractor {
    grammar: Grammar,
}

impl ChainSplitExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self { grammar: Grammar::new(EventKind::ChainSplitDetected, SPLIT)? })
    }
}

impl EventExtractor for ChainSplitExtractor {
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError> {
        let fields = self.grammar.apply(payload)?;

        Ok(EventRecord::ChainSplitDetected(ChainSplitEvent {
            number: fields.number("number")?,
            hash: fields.token("hash")?,
            drop: fields.number("drop")?,
            drop_from: fields.token("dropfrom")?,
            add: fields.number("add")?,
            add_from: fields.token("addfrom")?,
        }))
    }

    fn kind(&self) -> EventKind {
        EventKind::ChainSplitDetected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forked_block_with_padded_number() {
        let extractor = ForkedBlockExtractor::new().unwrap();
        let record = extractor
            .extract("number=1  hash=e68e79…6f23a5 diff=131072 elapsed=651.016µs txs=0 gas=0 uncles=0")
            .unwrap();

        assert_eq!(
            record,
            EventRecord::InsertedForkedBlock(ForkedBlockEvent {
                number: 1,
                hash: "e68e79…6f23a5".to_string(),
                diff: 131_072,
                elapsed: "651.016µs".to_string(),
                txs: 0,
                gas: 0,
                uncles: 0,
            })
        );
    }

    #[test]
    fn test_forked_block_missing_uncles() {
        let extractor = ForkedBlockExtractor::new().unwrap();
        let err = extractor
            .extract("number=1 hash=e6 diff=131072 elapsed=1ms txs=0 gas=0")
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field: "uncles", .. }));
    }

    #[test]
    fn test_chain_split() {
        let extractor = ChainSplitExtractor::new().unwrap();
        let record = extractor
            .extract("number=0 hash=351c48…6c9ea9 drop=1 dropfrom=ba0794…5bfc7a add=1 addfrom=9c2008…0bbea8")
            .unwrap();

        assert_eq!(
            record,
            EventRecord::ChainSplitDetected(ChainSplitEvent {
                number: 0,
                hash: "351c48…6c9ea9".to_string(),
                drop: 1,
                drop_from: "ba0794…5bfc7a".to_string(),
                add: 1,
                add_from: "9c2008…0bbea8".to_string(),
            })
        );
    }

    #[test]
    fn test_chain_split_drop_before_dropfrom() {
        // `drop=` must not be satisfied by the `dropfrom=` pair
        let extractor = ChainSplitExtractor::new().unwrap();
        let err = extractor
            .extract("number=0 hash=35 dropfrom=ba add=1 addfrom=9c")
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field: "drop", .. }));
    }
}
