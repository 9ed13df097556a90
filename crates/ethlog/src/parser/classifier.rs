use super::model::{Columns, EventKind};

/// One classification anchor: a whole message label and, where two events
/// share a label, the first payload key that tells them apart.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub label: &'static str,
    pub first_key: Option<&'static str>,
    pub kind: EventKind,
}

impl Rule {
    const fn new(label: &'static str, first_key: Option<&'static str>, kind: EventKind) -> Self {
        Self { label, first_key, kind }
    }

    fn matches(&self, label: &str, first_key: Option<&str>) -> bool {
        self.label == label && self.first_key.map_or(true, |key| first_key == Some(key))
    }
}

/// Order matters! The first matching rule wins.
pub const RULES: [Rule; 9] = [
    Rule::new("🔨 mined potential block", None, EventKind::MinedBlock),
    Rule::new("Propagated block", Some("hash"), EventKind::PropagatedBlockBroadcast),
    Rule::new("Propagated block", Some("id"), EventKind::PropagatedBlockPeer),
    Rule::new("Queued propagated block", None, EventKind::QueuedPropagatedBlock),
    Rule::new("Announced block", Some("hash"), EventKind::AnnouncedBlockBroadcast),
    Rule::new("Announced block", Some("id"), EventKind::AnnouncedBlockPeer),
    Rule::new("Importing propagated block", Some("peer"), EventKind::ImportingPropagatedBlock),
    Rule::new("Inserted forked block", None, EventKind::InsertedForkedBlock),
    Rule::new("Chain split detected", None, EventKind::ChainSplitDetected),
];

/// Maps split columns to an `EventKind`.
///
/// Never fails: a label or key the rules do not know yields `Unknown`.
pub struct EventClassifier {
    rules: Vec<Rule>,
}

impl EventClassifier {
    pub fn new() -> Self {
        Self { rules: RULES.to_vec() }
    }

    pub fn classify(&self, columns: &Columns<'_>) -> EventKind {
        let label = columns.label.trim();
        let key = columns.payload.and_then(first_key);

        self.rules
            .iter()
            .find(|rule| rule.matches(label, key))
            .map_or(EventKind::Unknown, |rule| rule.kind)
    }
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of the first `key=value` token in a payload.
pub fn first_key(payload: &str) -> Option<&str> {
    payload
        .split_whitespace()
        .next()
        .and_then(|token| token.split_once('='))
        .map(|(key, _)| key)
}
