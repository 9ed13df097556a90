/// Geth log line classification and field extraction
///
/// Turns one upstream log line into a typed event record.
///
/// # Architecture
///
/// - `columns.rs`: splits a raw line into header, message label and payload
/// - `header.rs`: status marker and timestamp from the header column
/// - `classifier.rs`: ordered anchor rules mapping a line to an `EventKind`
/// - `grammar.rs`: compiled `key=value` grammars with typed captures
/// - `events/`: one extractor per event kind
/// - `engine.rs`: per-line orchestration
/// - `metrics.rs`: per-kind counters
///
/// # Failure model
///
/// Classification is fail-soft: anything unrecognised becomes
/// `EventKind::Unknown` and is dropped. Extraction is fail-fast: a classified
/// line that does not match its grammar returns a `ParseError` and the caller
/// aborts the run.

pub mod traits;
pub mod model;
pub mod columns;
pub mod header;
pub mod classifier;
pub mod grammar;
pub mod events;
pub mod engine;
pub mod metrics;

// Re-export commonly used types
pub use engine::{LineParser, ParsedLine};
pub use model::{Columns, EventKind, EventRecord, Header, ParseError};
pub use traits::EventExtractor;

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
/// Width of the upstream message field (characters, not bytes)
pub const LABEL_WIDTH: usize = 40;
/// Upstream timestamps carry no year; parsed values land in year 0.
pub const UPSTREAM_YEAR: i32 = 0;
