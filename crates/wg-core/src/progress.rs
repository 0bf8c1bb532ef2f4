//! Collection progress: milestones counted from the nodes a player has visited.

use serde::{Deserialize, Serialize};

use crate::document::NodeId;
use crate::state::GameState;

/// A node whose visit counts toward collection progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Display identifier (e.g. `"red"`).
    pub id: String,
    /// Node that collects this milestone.
    pub node: NodeId,
}

/// Declares a collection-progress overlay for a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSpec {
    /// Overlay heading.
    pub label: String,
    /// The overlay stays hidden until this node has been reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_after: Option<NodeId>,
    /// Milestones in display order.
    pub milestones: Vec<Milestone>,
}

impl ProgressSpec {
    /// Create a progress definition without milestones.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reveal_after: None,
            milestones: Vec::new(),
        }
    }

    /// Hide the overlay until the node is reached.
    pub fn reveal_after(mut self, node: impl Into<NodeId>) -> Self {
        self.reveal_after = Some(node.into());
        self
    }

    /// Add a milestone.
    pub fn with_milestone(mut self, id: impl Into<String>, node: impl Into<NodeId>) -> Self {
        self.milestones.push(Milestone {
            id: id.into(),
            node: node.into(),
        });
        self
    }

    /// Evaluate against a game state.
    pub fn evaluate(&self, state: &GameState) -> CollectionProgress {
        let revealed = self
            .reveal_after
            .as_ref()
            .is_none_or(|node| state.has_visited(node));
        let milestones = self
            .milestones
            .iter()
            .map(|m| (m.id.clone(), state.has_visited(&m.node)))
            .collect();
        CollectionProgress {
            label: self.label.clone(),
            revealed,
            milestones,
        }
    }
}

/// Progress snapshot for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionProgress {
    /// Overlay heading.
    pub label: String,
    /// Whether the overlay should be shown yet.
    pub revealed: bool,
    /// Milestone ids with their collected flag.
    pub milestones: Vec<(String, bool)>,
}

impl CollectionProgress {
    /// Number of collected milestones.
    pub fn collected(&self) -> usize {
        self.milestones.iter().filter(|(_, done)| *done).count()
    }

    /// Total number of milestones.
    pub fn total(&self) -> usize {
        self.milestones.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HistoryEntry;

    fn diamonds() -> ProgressSpec {
        ProgressSpec::new("Diamonds")
            .reveal_after("accept_mission")
            .with_milestone("red", "dino_contest")
            .with_milestone("blue", "rock_speech")
    }

    #[test]
    fn hidden_before_reveal_node() {
        let state = GameState::new("intro");
        let progress = diamonds().evaluate(&state);
        assert!(!progress.revealed);
        assert_eq!(progress.collected(), 0);
        assert_eq!(progress.total(), 2);
    }

    #[test]
    fn counts_history_and_current_node() {
        let mut state = GameState::new("rock_speech");
        state.history.push(HistoryEntry::new("accept_mission", Vec::new()));
        state.history.push(HistoryEntry::new("dino_contest", Vec::new()));

        let progress = diamonds().evaluate(&state);
        assert!(progress.revealed);
        assert_eq!(progress.collected(), 2);
        assert_eq!(
            progress.milestones,
            vec![("red".to_string(), true), ("blue".to_string(), true)]
        );
    }

    #[test]
    fn no_reveal_node_means_always_shown() {
        let spec = ProgressSpec::new("Stars").with_milestone("one", "a");
        assert!(spec.evaluate(&GameState::new("start")).revealed);
    }
}
