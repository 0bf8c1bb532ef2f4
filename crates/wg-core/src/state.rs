//! Game state for one playthrough.

use serde::{Deserialize, Serialize};

use crate::document::NodeId;

/// One undo step: a node that was left and the inventory at departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The node that was left.
    pub node: NodeId,
    /// Inventory as it was when the node was left.
    #[serde(default, rename = "inventory")]
    pub inventory_snapshot: Vec<String>,
}

impl HistoryEntry {
    /// Create a history entry.
    pub fn new(node: impl Into<NodeId>, inventory_snapshot: Vec<String>) -> Self {
        Self {
            node: node.into(),
            inventory_snapshot,
        }
    }
}

/// Position, inventory, and undo history of a playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// The node currently displayed.
    pub current_node: NodeId,
    /// Held items in collection order, without duplicates.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Undo stack, oldest first.
    #[serde(default, rename = "nodeHistory")]
    pub history: Vec<HistoryEntry>,
}

impl GameState {
    /// A fresh state positioned at the given node.
    pub fn new(current_node: impl Into<NodeId>) -> Self {
        Self {
            current_node: current_node.into(),
            inventory: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Check if an item is held.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|held| held == item)
    }

    /// Add an item unless already held. Returns whether it was added.
    pub fn add_item(&mut self, item: &str) -> bool {
        if self.has_item(item) {
            return false;
        }
        self.inventory.push(item.to_string());
        true
    }

    /// Remove one instance of an item. Returns whether it was held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|held| held == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the node is current or appears anywhere in history.
    pub fn has_visited(&self, node: &NodeId) -> bool {
        self.current_node == *node || self.history.iter().any(|entry| entry.node == *node)
    }
}
