//! Events emitted by match transitions.

use alloc::string::String;
use alloc::vec::Vec;

/// Outbound notifications produced by match transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    /// A match against the computer was created; the opponent should join.
    MatchCreated { match_id: String },
    /// A human fired and the computer moves next.
    FireOccurred { match_id: String },
    /// A fire sank the last ship.
    MatchFinished { match_id: String, winner: String },
}

impl MatchEvent {
    pub fn match_id(&self) -> &str {
        match self {
            MatchEvent::MatchCreated { match_id }
            | MatchEvent::FireOccurred { match_id }
            | MatchEvent::MatchFinished { match_id, .. } => match_id,
        }
    }
}

/// Result of a state transition plus the events it emits, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    pub outcome: T,
    pub events: Vec<MatchEvent>,
}

impl<T> Transition<T> {
    pub fn quiet(outcome: T) -> Self {
        Self {
            outcome,
            events: Vec::new(),
        }
    }

    pub fn with_events(outcome: T, events: Vec<MatchEvent>) -> Self {
        Self { outcome, events }
    }
}
