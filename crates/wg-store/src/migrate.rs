//! Upgrades save files written by older players to the current shape.
//!
//! Older saves stored `nodeHistory` as plain node ids. Those entries become
//! history entries with an empty inventory snapshot, since the inventory at
//! departure was never recorded. Missing or `null` inventories and histories
//! read as empty.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use wg_core::{GameState, HistoryEntry, NodeId};

/// A save slot as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    /// The normalized state.
    pub state: GameState,
    /// When the save was written, if recorded.
    pub saved_at: Option<DateTime<Utc>>,
    /// Whether any legacy history entries were upgraded.
    pub migrated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHistoryEntry {
    Legacy(NodeId),
    Entry(HistoryEntry),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSave {
    current_node: NodeId,
    #[serde(default)]
    inventory: Option<Vec<String>>,
    #[serde(default)]
    node_history: Option<Vec<RawHistoryEntry>>,
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Parse a save file in any known format.
pub fn parse_save(json: &str) -> serde_json::Result<SavedGame> {
    let raw: RawSave = serde_json::from_str(json)?;

    let mut migrated = false;
    let history = raw
        .node_history
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            RawHistoryEntry::Legacy(node) => {
                migrated = true;
                HistoryEntry::new(node, Vec::new())
            }
            RawHistoryEntry::Entry(entry) => entry,
        })
        .collect();

    Ok(SavedGame {
        state: GameState {
            current_node: raw.current_node,
            inventory: raw.inventory.unwrap_or_default(),
            history,
        },
        saved_at: raw.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis),
        migrated,
    })
}
