//! Save slots: where the engine writes its state after every mutation.

use std::collections::HashMap;
use std::convert::Infallible;

use crate::state::GameState;

/// A key-value store with one save slot per story id.
///
/// Saves are best-effort: the engine logs a failed save and carries on.
pub trait SaveStore {
    /// Error produced by the backing storage.
    type Error: std::error::Error;

    /// Load the saved state for a story, if any.
    fn load(&self, story_id: &str) -> Result<Option<GameState>, Self::Error>;

    /// Overwrite the save slot for a story.
    fn save(&mut self, story_id: &str, state: &GameState) -> Result<(), Self::Error>;

    /// Remove the save slot for a story.
    fn clear(&mut self, story_id: &str) -> Result<(), Self::Error>;
}

/// In-memory save slots.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slots: HashMap<String, GameState>,
    writes: usize,
}

impl MemorySaveStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one pre-filled slot.
    pub fn with_slot(story_id: impl Into<String>, state: GameState) -> Self {
        let mut store = Self::new();
        store.slots.insert(story_id.into(), state);
        store
    }

    /// Peek at a slot.
    pub fn slot(&self, story_id: &str) -> Option<&GameState> {
        self.slots.get(story_id)
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SaveStore for MemorySaveStore {
    type Error = Infallible;

    fn load(&self, story_id: &str) -> Result<Option<GameState>, Infallible> {
        Ok(self.slots.get(story_id).cloned())
    }

    fn save(&mut self, story_id: &str, state: &GameState) -> Result<(), Infallible> {
        self.slots.insert(story_id.to_string(), state.clone());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self, story_id: &str) -> Result<(), Infallible> {
        self.slots.remove(story_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_per_story() {
        let mut store = MemorySaveStore::new();
        store.save("a", &GameState::new("one")).unwrap();
        store.save("b", &GameState::new("two")).unwrap();

        assert_eq!(store.load("a").unwrap().unwrap().current_node, "one");
        assert_eq!(store.load("b").unwrap().unwrap().current_node, "two");
        assert_eq!(store.writes(), 2);

        store.clear("a").unwrap();
        assert!(store.load("a").unwrap().is_none());
        assert!(store.slot("b").is_some());
    }
}
