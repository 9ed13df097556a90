pub use super::model::{EventKind, EventRecord, ParseError};

pub trait EventExtractor: Send + Sync {
    /// extract the kind's typed record from a payload column
    fn extract(&self, payload: &str) -> Result<EventRecord, ParseError>;
    fn kind(&self) -> EventKind;
}
