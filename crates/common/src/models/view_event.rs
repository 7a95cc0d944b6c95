use serde_json::Value;

use crate::models::SignalEvent;

/// Updates consumed by the view actor. Every variant carries the full
/// replacement payload for its region group, never a delta.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// Raw status snapshot, still loosely typed at this point.
    Status(Value),
    /// Full signal history, oldest first.
    Signals(Vec<SignalEvent>),
    /// A mode change the backend just accepted.
    ModeApplied(String),
}
