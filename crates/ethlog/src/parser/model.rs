use std::fmt;
use std::num::ParseIntError;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Not a recognised event (dropped from output)
    Unknown,
    /// `🔨 mined potential block`
    MinedBlock,
    /// `Propagated block` broadcast summary (hash, recipients, duration)
    PropagatedBlockBroadcast,
    /// `Propagated block` sent to a single peer (id, conn, number, hash, td)
    PropagatedBlockPeer,
    /// `Queued propagated block`
    QueuedPropagatedBlock,
    /// `Announced block` broadcast summary (hash, recipients, duration)
    AnnouncedBlockBroadcast,
    /// `Announced block` sent to a single peer (id, conn, number, hash)
    AnnouncedBlockPeer,
    /// `Importing propagated block`
    ImportingPropagatedBlock,
    /// `Inserted forked block`
    InsertedForkedBlock,
    /// `Chain split detected`
    ChainSplitDetected,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Unknown,
        EventKind::MinedBlock,
        EventKind::PropagatedBlockBroadcast,
        EventKind::PropagatedBlockPeer,
        EventKind::QueuedPropagatedBlock,
        EventKind::AnnouncedBlockBroadcast,
        EventKind::AnnouncedBlockPeer,
        EventKind::ImportingPropagatedBlock,
        EventKind::InsertedForkedBlock,
        EventKind::ChainSplitDetected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Unknown => "unknown",
            EventKind::MinedBlock => "mined_block",
            EventKind::PropagatedBlockBroadcast => "propagated_block_broadcast",
            EventKind::PropagatedBlockPeer => "propagated_block_peer",
            EventKind::QueuedPropagatedBlock => "queued_propagated_block",
            EventKind::AnnouncedBlockBroadcast => "announced_block_broadcast",
            EventKind::AnnouncedBlockPeer => "announced_block_peer",
            EventKind::ImportingPropagatedBlock => "importing_propagated_block",
            EventKind::InsertedForkedBlock => "inserted_forked_block",
            EventKind::ChainSplitDetected => "chain_split_detected",
        }
    }

    /// Fixed numeric code, usable as the event-type output column
    pub fn code(&self) -> u8 {
        match self {
            EventKind::Unknown => 0,
            EventKind::MinedBlock => 1,
            EventKind::PropagatedBlockBroadcast => 2,
            EventKind::PropagatedBlockPeer => 3,
            EventKind::QueuedPropagatedBlock => 4,
            EventKind::AnnouncedBlockBroadcast => 5,
            EventKind::AnnouncedBlockPeer => 6,
            EventKind::ImportingPropagatedBlock => 7,
            EventKind::InsertedForkedBlock => 8,
            EventKind::ChainSplitDetected => 9,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three structural columns of an upstream line, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns<'a> {
    /// `STATUS[MM-DD|HH:MM:SS.mmm]`, always ends with `]`
    pub header: &'a str,
    /// Fixed-width message field, padding included
    pub label: &'a str,
    /// Trailing `key=value` pairs (absent for label-only lines)
    pub payload: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Severity marker (`DEBUG`, `INFO`, ...), trailing padding removed
    pub status: String,
    /// Millisecond timestamp, year fixed to `UPSTREAM_YEAR`
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinedBlockEvent {
    pub number: u32,
    pub hash: String,
}

/// Aggregate broadcast stats, shared by the propagated and announced summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastEvent {
    pub hash: String,
    pub recipients: u32,
    /// Kept as logged (e.g. `2562047h47m16.854s`)
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropagatedPeerEvent {
    pub id: String,
    pub conn: String,
    pub number: u32,
    pub hash: String,
    /// Total difficulty
    pub td: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncedPeerEvent {
    pub id: String,
    pub conn: String,
    pub number: u32,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedBlockEvent {
    pub peer: String,
    pub number: u32,
    pub hash: String,
    pub queued: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportingBlockEvent {
    pub peer: String,
    pub number: u32,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkedBlockEvent {
    pub number: u32,
    pub hash: String,
    pub diff: u32,
    pub elapsed: String,
    pub txs: u32,
    pub gas: u32,
    pub uncles: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSplitEvent {
    pub number: u32,
    pub hash: String,
    pub drop: u32,
    pub drop_from: String,
    pub add: u32,
    pub add_from: String,
}

/// Typed payload of a classified line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRecord {
    MinedBlock(MinedBlockEvent),
    PropagatedBlockBroadcast(BroadcastEvent),
    PropagatedBlockPeer(PropagatedPeerEvent),
    QueuedPropagatedBlock(QueuedBlockEvent),
    AnnouncedBlockBroadcast(BroadcastEvent),
    AnnouncedBlockPeer(AnnouncedPeerEvent),
    ImportingPropagatedBlock(ImportingBlockEvent),
    InsertedForkedBlock(ForkedBlockEvent),
    ChainSplitDetected(ChainSplitEvent),
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        match self {
            EventRecord::MinedBlock(_) => EventKind::MinedBlock,
            EventRecord::PropagatedBlockBroadcast(_) => EventKind::PropagatedBlockBroadcast,
            EventRecord::PropagatedBlockPeer(_) => EventKind::PropagatedBlockPeer,
            EventRecord::QueuedPropagatedBlock(_) => EventKind::QueuedPropagatedBlock,
            EventRecord::AnnouncedBlockBroadcast(_) => EventKind::AnnouncedBlockBroadcast,
            EventRecord::AnnouncedBlockPeer(_) => EventKind::AnnouncedBlockPeer,
            EventRecord::ImportingPropagatedBlock(_) => EventKind::ImportingPropagatedBlock,
            EventRecord::InsertedForkedBlock(_) => EventKind::InsertedForkedBlock,
            EventRecord::ChainSplitDetected(_) => EventKind::ChainSplitDetected,
        }
    }

    /// Block number, `None` for the broadcast summaries which do not log one
    pub fn block_number(&self) -> Option<u32> {
        match self {
            EventRecord::MinedBlock(e) => Some(e.number),
            EventRecord::PropagatedBlockBroadcast(_) | EventRecord::AnnouncedBlockBroadcast(_) => None,
            EventRecord::PropagatedBlockPeer(e) => Some(e.number),
            EventRecord::QueuedPropagatedBlock(e) => Some(e.number),
            EventRecord::AnnouncedBlockPeer(e) => Some(e.number),
            EventRecord::ImportingPropagatedBlock(e) => Some(e.number),
            EventRecord::InsertedForkedBlock(e) => Some(e.number),
            EventRecord::ChainSplitDetected(e) => Some(e.number),
        }
    }

    pub fn hash(&self) -> &str {
        match self {
            EventRecord::MinedBlock(e) => &e.hash,
            EventRecord::PropagatedBlockBroadcast(e) | EventRecord::AnnouncedBlockBroadcast(e) => &e.hash,
            EventRecord::PropagatedBlockPeer(e) => &e.hash,
            EventRecord::QueuedPropagatedBlock(e) => &e.hash,
            EventRecord::AnnouncedBlockPeer(e) => &e.hash,
            EventRecord::ImportingPropagatedBlock(e) => &e.hash,
            EventRecord::InsertedForkedBlock(e) => &e.hash,
            EventRecord::ChainSplitDetected(e) => &e.hash,
        }
    }
}

/// Hard failures. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("Non-UTF8 content")]
    NonUtf8,

    #[error("Invalid header, expected STATUS[MM-DD|HH:MM:SS.mmm]. Offending string was {0:?}")]
    InvalidHeader(String),

    #[error("Unable to parse timestamp. Offending string was {0:?}")]
    InvalidTimestamp(String),

    #[error("Failed to parse {kind}: missing {field}= in {payload:?}")]
    MissingField {
        kind: EventKind,
        field: &'static str,
        payload: String,
    },

    #[error("Failed to parse {kind}: expected `{grammar}`, got {payload:?}")]
    GrammarMismatch {
        kind: EventKind,
        grammar: String,
        payload: String,
    },

    #[error("Failed to parse {field} of {kind}. Offending string: {raw:?}")]
    InvalidNumber {
        kind: EventKind,
        field: &'static str,
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("No extractor registered for {0}")]
    Unsupported(EventKind),

    #[error("Invalid grammar pattern: {0}")]
    InvalidPattern(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_declaration_order() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, i, "code mismatch for {}", kind);
        }
    }

    #[test]
    fn test_record_kind_matches_variant() {
        let record = EventRecord::AnnouncedBlockBroadcast(BroadcastEvent {
            hash: "75d8ad…0f4a6c".to_string(),
            recipients: 9,
            duration: "2562047h47m16.854s".to_string(),
        });

        assert_eq!(record.kind(), EventKind::AnnouncedBlockBroadcast);
        assert_eq!(record.block_number(), None);
        assert_eq!(record.hash(), "75d8ad…0f4a6c");
    }

    #[test]
    fn test_error_names_field_and_offending_string() {
        let source = "4294967296".parse::<u32>().unwrap_err();
        let err = ParseError::InvalidNumber {
            kind: EventKind::MinedBlock,
            field: "number",
            raw: "4294967296".to_string(),
            source,
        };

        let msg = err.to_string();
        assert!(msg.contains("number"));
        assert!(msg.contains("mined_block"));
        assert!(msg.contains("4294967296"));
    }
}
