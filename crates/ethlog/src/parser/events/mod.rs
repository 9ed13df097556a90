/// One extractor per event kind, grouped by event family

pub mod mined;
pub mod broadcast;
pub mod peer;
pub mod import;
pub mod chain;

// Re-export extractor implementations
pub use mined::MinedBlockExtractor;
pub use broadcast::BroadcastExtractor;
pub use peer::{AnnouncedPeerExtractor, PropagatedPeerExtractor};
pub use import::{ImportingBlockExtractor, QueuedBlockExtractor};
pub use chain::{ChainSplitExtractor, ForkedBlockExtractor};

use super::traits::{EventExtractor, ParseError};

/// Every extractor, one per non-`Unknown` kind.
pub fn all() -> Result<Vec<Box<dyn EventExtractor>>, ParseError> {
    Ok(vec![
        Box::new(MinedBlockExtractor::new()?),
        Box::new(BroadcastExtractor::propagated()?),
        Box::new(PropagatedPeerExtractor::new()?),
        Box::new(QueuedBlockExtractor::new()?),
        Box::new(BroadcastExtractor::announced()?),
        Box::new(AnnouncedPeerExtractor::new()?),
        Box::new(ImportingBlockExtractor::new()?),
        Box::new(ForkedBlockExtractor::new()?),
        Box::new(ChainSplitExtractor::new()?),
    ])
}
