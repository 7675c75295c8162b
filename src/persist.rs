//! JSON serialization of game snapshots.
//!
//! A [`GameState`] serializes to a versionless document with stable
//! camelCase field names (`currentTurn`, `placedTiles`, `islands`, ...),
//! so saves stay readable by other components that share the format. The
//! engine itself never writes files; hosts decide where the document goes.

use crate::state::GameState;

/// Serialize a snapshot to a compact JSON document.
pub fn to_json(state: &GameState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

/// Serialize a snapshot to an indented JSON document.
pub fn to_json_pretty(state: &GameState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

/// Parse a snapshot back from its JSON document.
pub fn from_json(json: &str) -> serde_json::Result<GameState> {
    serde_json::from_str(json)
}
