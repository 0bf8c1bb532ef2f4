//! Story documents: the node graph a playthrough walks.
//!
//! Documents are authored as JSON. Each node carries narrative text and
//! exactly one of `choices`, `roll`, or `isEnd`; the raw shape is checked
//! once at load time and turned into [`NodeKind`].

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::progress::ProgressSpec;
use crate::roll::RollSpec;

/// Identifier of a node within a story document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A player-selected transition out of a choice node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,
    /// Target node.
    pub next: NodeId,
    /// Item required to take this choice; it is consumed when taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl Choice {
    /// Create a choice without an item requirement.
    pub fn new(text: impl Into<String>, next: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
            item: None,
        }
    }

    /// Require (and consume) an item.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }
}

/// The transition shape of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Player picks one of the listed choices.
    Choice(Vec<Choice>),
    /// A draw picks one of the roll's outcomes.
    Roll(RollSpec),
    /// Terminal node.
    End {
        /// Whether this is a failure ending.
        bad: bool,
    },
}

impl NodeKind {
    /// Short lowercase name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Choice(_) => "choice",
            Self::Roll(_) => "roll",
            Self::End { .. } => "end",
        }
    }
}

/// A single node of the story graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// Narrative text shown on entry. May be empty.
    pub text: String,
    /// Item granted when the node is entered.
    pub collect_item: Option<String>,
    /// How the story continues from here.
    pub kind: NodeKind,
}

impl NodeSpec {
    /// A choice node.
    pub fn choice(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            text: text.into(),
            collect_item: None,
            kind: NodeKind::Choice(choices),
        }
    }

    /// A roll node.
    pub fn roll(text: impl Into<String>, roll: RollSpec) -> Self {
        Self {
            text: text.into(),
            collect_item: None,
            kind: NodeKind::Roll(roll),
        }
    }

    /// A successful ending.
    pub fn end(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            collect_item: None,
            kind: NodeKind::End { bad: false },
        }
    }

    /// A failure ending.
    pub fn bad_end(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            collect_item: None,
            kind: NodeKind::End { bad: true },
        }
    }

    /// Grant an item on entry.
    pub fn with_collect_item(mut self, item: impl Into<String>) -> Self {
        self.collect_item = Some(item.into());
        self
    }

    /// The choices, if this is a choice node.
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.kind {
            NodeKind::Choice(choices) => Some(choices),
            _ => None,
        }
    }

    /// The roll, if this is a roll node.
    pub fn roll_spec(&self) -> Option<&RollSpec> {
        match &self.kind {
            NodeKind::Roll(roll) => Some(roll),
            _ => None,
        }
    }

    /// Whether this is an end node.
    pub fn is_end(&self) -> bool {
        matches!(self.kind, NodeKind::End { .. })
    }

    /// Whether this is a failure ending.
    pub fn is_bad_ending(&self) -> bool {
        matches!(self.kind, NodeKind::End { bad: true })
    }

    /// Every outgoing target, in document order.
    pub fn targets(&self) -> Vec<&NodeId> {
        match &self.kind {
            NodeKind::Choice(choices) => choices.iter().map(|c| &c.next).collect(),
            NodeKind::Roll(roll) => roll.outcomes.iter().map(|o| &o.next).collect(),
            NodeKind::End { .. } => Vec::new(),
        }
    }
}

/// Optional feature flags declared by a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(BTreeMap<String, bool>);

impl Capabilities {
    /// Capability that turns on the collection-progress overlay.
    pub const COLLECTION_PROGRESS: &'static str = "collectionProgress";

    /// Whether a flag is present and set.
    pub fn enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Set a flag.
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    /// Names of all enabled flags.
    pub fn iter_enabled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }
}

/// A complete, immutable story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct StoryDocument {
    /// Entry node.
    pub start_node: NodeId,
    /// All nodes by id.
    pub nodes: BTreeMap<NodeId, NodeSpec>,
    /// Feature flags.
    pub capabilities: Capabilities,
    /// Collection-progress overlay definition.
    pub progress: Option<ProgressSpec>,
}

impl StoryDocument {
    /// Create an empty document with the given start node.
    pub fn new(start_node: impl Into<NodeId>) -> Self {
        Self {
            start_node: start_node.into(),
            nodes: BTreeMap::new(),
            capabilities: Capabilities::default(),
            progress: None,
        }
    }

    /// Add a node.
    pub fn with_node(mut self, id: impl Into<NodeId>, node: NodeSpec) -> Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Attach a collection-progress definition and enable its capability.
    pub fn with_progress(mut self, progress: ProgressSpec) -> Self {
        self.capabilities
            .set(Capabilities::COLLECTION_PROGRESS, true);
        self.progress = Some(progress);
        self
    }

    /// Parse a document from JSON, rejecting malformed nodes.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> StoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a node.
    pub fn node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.get(id)
    }

    /// Whether a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    start_node: NodeId,
    nodes: BTreeMap<NodeId, RawNode>,
    #[serde(default, skip_serializing_if = "is_default")]
    capabilities: Capabilities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    progress: Option<ProgressSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collect_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<Choice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    roll: Option<RollSpec>,
    #[serde(default, skip_serializing_if = "is_default")]
    is_end: bool,
    #[serde(default, skip_serializing_if = "is_default")]
    bad_ending: bool,
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

impl RawNode {
    fn into_spec(self, id: &NodeId) -> StoryResult<NodeSpec> {
        let has_other = self.roll.is_some() || self.is_end;
        // An empty choice list next to a roll or end marker offers nothing.
        let choices = self
            .choices
            .filter(|choices| !(choices.is_empty() && has_other));

        let kind = match (choices, self.roll, self.is_end) {
            (Some(choices), None, false) => NodeKind::Choice(choices),
            (None, Some(roll), false) => {
                if roll.outcomes.is_empty() {
                    return Err(StoryError::InvalidNode(format!(
                        "\"{id}\": roll has no outcomes"
                    )));
                }
                NodeKind::Roll(roll)
            }
            (None, None, true) => NodeKind::End {
                bad: self.bad_ending,
            },
            (None, None, false) => {
                return Err(StoryError::InvalidNode(format!(
                    "\"{id}\": needs one of choices, roll, or isEnd"
                )));
            }
            _ => {
                return Err(StoryError::InvalidNode(format!(
                    "\"{id}\": only one of choices, roll, or isEnd is allowed"
                )));
            }
        };

        Ok(NodeSpec {
            text: self.text,
            collect_item: self.collect_item,
            kind,
        })
    }
}

impl From<NodeSpec> for RawNode {
    fn from(node: NodeSpec) -> Self {
        let mut raw = RawNode {
            text: node.text,
            collect_item: node.collect_item,
            choices: None,
            roll: None,
            is_end: false,
            bad_ending: false,
        };
        match node.kind {
            NodeKind::Choice(choices) => raw.choices = Some(choices),
            NodeKind::Roll(roll) => raw.roll = Some(roll),
            NodeKind::End { bad } => {
                raw.is_end = true;
                raw.bad_ending = bad;
            }
        }
        raw
    }
}

impl TryFrom<RawDocument> for StoryDocument {
    type Error = StoryError;

    fn try_from(raw: RawDocument) -> StoryResult<Self> {
        let nodes = raw
            .nodes
            .into_iter()
            .map(|(id, node)| node.into_spec(&id).map(|spec| (id, spec)))
            .collect::<StoryResult<BTreeMap<_, _>>>()?;

        Ok(Self {
            start_node: raw.start_node,
            nodes,
            capabilities: raw.capabilities,
            progress: raw.progress,
        })
    }
}

impl From<StoryDocument> for RawDocument {
    fn from(doc: StoryDocument) -> Self {
        Self {
            start_node: doc.start_node,
            nodes: doc
                .nodes
                .into_iter()
                .map(|(id, node)| (id, RawNode::from(node)))
                .collect(),
            capabilities: doc.capabilities,
            progress: doc.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::OutcomeRange;

    const FOREST: &str = r#"{
        "startNode": "clearing",
        "capabilities": { "collectionProgress": false, "narration": true },
        "nodes": {
            "clearing": {
                "text": "A quiet clearing.",
                "collectItem": "lantern",
                "choices": [
                    { "text": "Enter the cave", "next": "cave", "item": "lantern" },
                    { "text": "Cross the river", "next": "river" }
                ]
            },
            "river": {
                "text": "The current is strong.",
                "roll": {
                    "text": "Try to swim",
                    "outcomes": [
                        { "range": "1-3", "text": "Swept away", "next": "drowned" },
                        { "range": "4-6", "text": "You make it", "next": "cave" }
                    ]
                }
            },
            "cave": { "text": "Treasure!", "isEnd": true },
            "drowned": { "text": "", "isEnd": true, "badEnding": true }
        }
    }"#;

    #[test]
    fn parse_all_variants() {
        let doc = StoryDocument::from_json(FOREST).unwrap();
        assert_eq!(doc.start_node, "clearing");
        assert_eq!(doc.node_count(), 4);

        let clearing = doc.node("clearing").unwrap();
        assert_eq!(clearing.collect_item.as_deref(), Some("lantern"));
        let choices = clearing.choices().unwrap();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].item.as_deref(), Some("lantern"));
        assert_eq!(choices[1].item, None);

        let roll = doc.node("river").unwrap().roll_spec().unwrap();
        assert_eq!(roll.outcomes[1].range, OutcomeRange { min: 4, max: 6 });

        assert!(doc.node("cave").unwrap().is_end());
        assert!(!doc.node("cave").unwrap().is_bad_ending());
        assert!(doc.node("drowned").unwrap().is_bad_ending());
        assert_eq!(doc.node("drowned").unwrap().text, "");
    }

    #[test]
    fn capabilities_only_count_true_flags() {
        let doc = StoryDocument::from_json(FOREST).unwrap();
        assert!(doc.capabilities.enabled("narration"));
        assert!(!doc.capabilities.enabled(Capabilities::COLLECTION_PROGRESS));
        assert!(!doc.capabilities.enabled("unknown"));
        assert_eq!(doc.capabilities.iter_enabled().collect::<Vec<_>>(), vec!["narration"]);
    }

    #[test]
    fn reject_node_without_variant() {
        let json = r#"{ "startNode": "a", "nodes": { "a": { "text": "limbo" } } }"#;
        let err = StoryDocument::from_json(json).unwrap_err();
        assert!(matches!(err, StoryError::InvalidNode(msg) if msg.contains("\"a\"")));
    }

    #[test]
    fn reject_node_with_two_variants() {
        let json = r#"{ "startNode": "a", "nodes": { "a": {
            "text": "both",
            "isEnd": true,
            "choices": [{ "text": "go", "next": "a" }]
        } } }"#;
        assert!(matches!(
            StoryDocument::from_json(json),
            Err(StoryError::InvalidNode(_))
        ));
    }

    #[test]
    fn empty_choices_beside_end_marker_is_an_end() {
        let json = r#"{ "startNode": "a", "nodes": { "a": {
            "text": "fin", "isEnd": true, "choices": []
        } } }"#;
        let doc = StoryDocument::from_json(json).unwrap();
        assert!(doc.node("a").unwrap().is_end());
    }

    #[test]
    fn reject_roll_without_outcomes() {
        let json = r#"{ "startNode": "a", "nodes": { "a": {
            "text": "dice", "roll": { "text": "roll", "outcomes": [] }
        } } }"#;
        assert!(matches!(
            StoryDocument::from_json(json),
            Err(StoryError::InvalidNode(_))
        ));
    }

    #[test]
    fn reject_null_text() {
        let json = r#"{ "startNode": "a", "nodes": { "a": { "text": null, "isEnd": true } } }"#;
        assert!(matches!(
            StoryDocument::from_json(json),
            Err(StoryError::Parse(_))
        ));
    }

    #[test]
    fn bad_range_is_a_parse_error() {
        let json = r#"{ "startNode": "a", "nodes": { "a": {
            "text": "dice",
            "roll": { "text": "roll", "outcomes": [{ "range": "6-1", "text": "x", "next": "a" }] }
        } } }"#;
        assert!(StoryDocument::from_json(json).is_err());
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let doc = StoryDocument::from_json(FOREST).unwrap();
        let again = StoryDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn targets_follow_document_order() {
        let doc = StoryDocument::from_json(FOREST).unwrap();
        let targets = doc.node("river").unwrap().targets();
        assert_eq!(targets, vec![&NodeId::from("drowned"), &NodeId::from("cave")]);
        assert!(doc.node("cave").unwrap().targets().is_empty());
    }
}
