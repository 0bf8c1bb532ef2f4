//! The story engine: walks a document's node graph for one playthrough.
//!
//! The engine owns a [`GameState`] and writes it to its [`SaveStore`] after
//! every mutation. Transitions either complete fully or leave the state
//! untouched.

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::document::{NodeId, NodeKind, NodeSpec, StoryDocument};
use crate::error::{StoryError, StoryResult};
use crate::persist::{MemorySaveStore, SaveStore};
use crate::progress::CollectionProgress;
use crate::roll::Outcome;
use crate::state::{GameState, HistoryEntry};

/// A playthrough of one story.
#[derive(Debug)]
pub struct StoryEngine<S: SaveStore = MemorySaveStore> {
    story_id: String,
    document: StoryDocument,
    state: GameState,
    store: S,
    resumed: bool,
}

impl<S: SaveStore> StoryEngine<S> {
    /// Create an engine positioned at the start node.
    ///
    /// Nothing is entered or saved until [`start`](Self::start),
    /// [`resume`](Self::resume), or [`open`](Self::open) is called.
    pub fn new(story_id: impl Into<String>, document: StoryDocument, store: S) -> StoryResult<Self> {
        if !document.contains(document.start_node.as_str()) {
            return Err(StoryError::MissingStartNode(document.start_node.clone()));
        }
        let state = GameState::new(document.start_node.clone());
        Ok(Self {
            story_id: story_id.into(),
            document,
            state,
            store,
            resumed: false,
        })
    }

    /// Create an engine and continue the saved playthrough, or start fresh
    /// when there is no usable save.
    pub fn open(story_id: impl Into<String>, document: StoryDocument, store: S) -> StoryResult<Self> {
        let mut engine = Self::new(story_id, document, store)?;
        match engine.store.load(&engine.story_id) {
            Ok(Some(saved)) => {
                if let Err(err) = engine.resume(saved) {
                    warn!(story = %engine.story_id, error = %err, "discarding saved state");
                    engine.start();
                }
            }
            Ok(None) => engine.start(),
            Err(err) => {
                warn!(story = %engine.story_id, error = %err, "failed to load saved state");
                engine.start();
            }
        }
        Ok(engine)
    }

    /// Begin a fresh playthrough at the start node.
    pub fn start(&mut self) {
        info!(story = %self.story_id, start = %self.document.start_node, "starting story");
        self.state = GameState::new(self.document.start_node.clone());
        self.resumed = false;
        self.enter(self.document.start_node.clone());
        self.persist();
    }

    /// Adopt a previously saved state verbatim.
    ///
    /// Fails with [`StoryError::InvalidState`] if the saved node or any
    /// history entry names an unknown node; the current state is left
    /// untouched in that case.
    pub fn resume(&mut self, saved: GameState) -> StoryResult<()> {
        let unknown = std::iter::once(&saved.current_node)
            .chain(saved.history.iter().map(|entry| &entry.node))
            .find(|node| !self.document.contains(node.as_str()));
        if let Some(node) = unknown {
            return Err(StoryError::InvalidState { node: node.clone() });
        }
        info!(story = %self.story_id, node = %saved.current_node, "resuming story");
        self.state = saved;
        self.resumed = true;
        Ok(())
    }

    /// Clear the save slot and start over.
    pub fn restart(&mut self) {
        if let Err(err) = self.store.clear(&self.story_id) {
            warn!(story = %self.story_id, error = %err, "failed to clear save slot");
        }
        self.start();
    }

    /// Take a choice on the current node.
    ///
    /// A required item is consumed. Returns the node entered.
    pub fn choose_option(&mut self, index: usize) -> StoryResult<&NodeSpec> {
        let from = self.state.current_node.clone();
        let choice = match &self.current_node().kind {
            NodeKind::Choice(choices) => choices
                .get(index)
                .cloned()
                .ok_or(StoryError::InvalidChoice(index))?,
            _ => return Err(StoryError::NotAChoiceNode(from)),
        };
        self.check_target(&from, &choice.next)?;

        if let Some(item) = &choice.item {
            if !self.state.remove_item(item) {
                return Err(StoryError::ItemRequired { item: item.clone() });
            }
            info!(story = %self.story_id, item = %item, "used item");
        }

        self.advance(from, choice.next);
        self.persist();
        Ok(self.current_node())
    }

    /// Resolve the current roll node with a draw from the random source.
    ///
    /// Returns the matched outcome and the node entered.
    pub fn resolve_roll(&mut self, draw: u32) -> StoryResult<(Outcome, &NodeSpec)> {
        let from = self.state.current_node.clone();
        let outcome = match &self.current_node().kind {
            NodeKind::Roll(roll) => roll.outcome_for(draw).cloned(),
            _ => return Err(StoryError::NotARollNode(from)),
        }
        .ok_or_else(|| StoryError::NoMatchingOutcome {
            node: from.clone(),
            draw,
        })?;
        self.check_target(&from, &outcome.next)?;

        debug!(story = %self.story_id, node = %from, draw, range = %outcome.range, "roll resolved");
        self.advance(from, outcome.next.clone());
        self.persist();
        Ok((outcome, self.current_node()))
    }

    /// Draw from the current roll's domain and resolve it.
    ///
    /// Returns the draw and the matched outcome.
    pub fn roll_with(&mut self, rng: &mut StdRng) -> StoryResult<(u32, Outcome)> {
        let draw = self
            .current_node()
            .roll_spec()
            .and_then(|roll| roll.draw(rng))
            .ok_or_else(|| StoryError::NotARollNode(self.state.current_node.clone()))?;
        let (outcome, _) = self.resolve_roll(draw)?;
        Ok((draw, outcome))
    }

    /// Step back to the previous node, restoring its inventory snapshot.
    ///
    /// Returns `false` when there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        let Some(entry) = self.state.history.pop() else {
            return false;
        };
        debug!(story = %self.story_id, from = %self.state.current_node, to = %entry.node, "going back");
        self.state.current_node = entry.node;
        self.state.inventory = entry.inventory_snapshot;
        self.persist();
        true
    }

    /// Whether the indexed choice can be taken right now.
    pub fn can_take_choice(&self, index: usize) -> bool {
        self.current_node()
            .choices()
            .and_then(|choices| choices.get(index))
            .is_some_and(|choice| {
                choice
                    .item
                    .as_deref()
                    .is_none_or(|item| self.state.has_item(item))
            })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The story id used as the save slot key.
    pub fn story_id(&self) -> &str {
        &self.story_id
    }

    /// The document being played.
    pub fn document(&self) -> &StoryDocument {
        &self.document
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The save store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Id of the node currently displayed.
    pub fn current_node_id(&self) -> &NodeId {
        &self.state.current_node
    }

    /// The node currently displayed.
    pub fn current_node(&self) -> &NodeSpec {
        // current_node and every history node name document nodes: both are
        // checked on construction and on resume, transitions only enter
        // checked targets, and go_back only restores history nodes.
        &self.document.nodes[&self.state.current_node]
    }

    /// Whether the current node is an ending.
    pub fn is_end(&self) -> bool {
        self.current_node().is_end()
    }

    /// Whether there is history to go back to.
    pub fn can_go_back(&self) -> bool {
        !self.state.history.is_empty()
    }

    /// Whether the state was adopted from a save.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    /// Collection progress, when the story enables it.
    pub fn progress(&self) -> Option<CollectionProgress> {
        if !self
            .document
            .capabilities
            .enabled(crate::document::Capabilities::COLLECTION_PROGRESS)
        {
            return None;
        }
        self.document
            .progress
            .as_ref()
            .map(|spec| spec.evaluate(&self.state))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn check_target(&self, from: &NodeId, target: &NodeId) -> StoryResult<()> {
        if self.document.contains(target.as_str()) {
            Ok(())
        } else {
            Err(StoryError::DanglingReference {
                from: from.clone(),
                target: target.clone(),
            })
        }
    }

    /// Record the outgoing node and enter the next one.
    fn advance(&mut self, from: NodeId, next: NodeId) {
        let repeated = self
            .state
            .history
            .last()
            .is_some_and(|entry| entry.node == from);
        if !repeated {
            self.state
                .history
                .push(HistoryEntry::new(from, self.state.inventory.clone()));
        }
        self.enter(next);
    }

    /// Make a node current and run its item grant check.
    fn enter(&mut self, node: NodeId) {
        debug!(story = %self.story_id, node = %node, "entering node");
        let grant = self
            .document
            .nodes
            .get(&node)
            .and_then(|spec| spec.collect_item.as_deref());
        if let Some(item) = grant {
            if self.state.add_item(item) {
                info!(story = %self.story_id, item = %item, "collected item");
            }
        }
        self.state.current_node = node;
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.story_id, &self.state) {
            warn!(story = %self.story_id, error = %err, "failed to save game state");
        }
    }
}
