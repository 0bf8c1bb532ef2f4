//! Core types for Wegweiser: story documents, game state, and the engine
//! that walks a story graph.
//!
//! A [`StoryDocument`] is a directed graph of narrative nodes. Each node
//! either offers choices (optionally gated by an inventory item), resolves a
//! dice roll, or ends the story. A [`StoryEngine`] plays one document,
//! tracking position, inventory, and an undo history, and writes its
//! [`GameState`] to a [`SaveStore`] after every move.

/// Story documents and node types.
pub mod document;
/// The traversal engine.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// Static graph analysis.
pub mod graph;
/// Save-slot persistence.
pub mod persist;
/// Collection-progress overlay.
pub mod progress;
/// Dice rolls and outcome ranges.
pub mod roll;
/// Per-playthrough game state.
pub mod state;
/// Authoring checks.
pub mod validate;

/// Re-export document types.
pub use document::{Capabilities, Choice, NodeId, NodeKind, NodeSpec, StoryDocument};
/// Re-export the engine.
pub use engine::StoryEngine;
/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export graph analysis.
pub use graph::StoryGraph;
/// Re-export persistence types.
pub use persist::{MemorySaveStore, SaveStore};
/// Re-export roll types.
pub use roll::{Outcome, OutcomeRange, RollSpec};
/// Re-export state types.
pub use state::{GameState, HistoryEntry};
/// Re-export validation types.
pub use validate::{Issue, Severity, ValidationReport, validate};
