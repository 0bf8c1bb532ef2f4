//! Static view of a story's node graph: edges, depths, and missing targets.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::document::{NodeId, NodeKind, StoryDocument};

/// How an edge is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Player choice.
    Choice,
    /// Roll outcome.
    Outcome,
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Node the edge leaves.
    pub source: NodeId,
    /// Node the edge enters. May be missing from the document.
    pub target: NodeId,
    /// Choice text, or `"range: text"` for outcomes.
    pub label: String,
    /// Whether a choice or a roll produces this edge.
    pub kind: EdgeKind,
    /// Item required to take a choice edge.
    pub item: Option<String>,
}

/// Edges, breadth-first depths, and broken references of a document.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    edges: Vec<Edge>,
    depths: BTreeMap<NodeId, usize>,
    missing: BTreeSet<NodeId>,
    unreachable: Vec<NodeId>,
}

impl StoryGraph {
    /// Analyze a document.
    pub fn build(document: &StoryDocument) -> Self {
        let mut edges = Vec::new();
        for (id, node) in &document.nodes {
            match &node.kind {
                NodeKind::Choice(choices) => {
                    edges.extend(choices.iter().map(|choice| Edge {
                        source: id.clone(),
                        target: choice.next.clone(),
                        label: choice.text.clone(),
                        kind: EdgeKind::Choice,
                        item: choice.item.clone(),
                    }));
                }
                NodeKind::Roll(roll) => {
                    edges.extend(roll.outcomes.iter().map(|outcome| Edge {
                        source: id.clone(),
                        target: outcome.next.clone(),
                        label: format!("{}: {}", outcome.range, outcome.text),
                        kind: EdgeKind::Outcome,
                        item: None,
                    }));
                }
                NodeKind::End { .. } => {}
            }
        }

        let missing = edges
            .iter()
            .filter(|edge| !document.contains(edge.target.as_str()))
            .map(|edge| edge.target.clone())
            .collect();

        let depths = breadth_first_depths(document);
        let unreachable = document
            .nodes
            .keys()
            .filter(|id| !depths.contains_key(*id))
            .cloned()
            .collect();

        Self {
            edges,
            depths,
            missing,
            unreachable,
        }
    }

    /// All edges, grouped by source in document order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges leaving a node.
    pub fn edges_from(&self, node: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|edge| edge.source == node).collect()
    }

    /// Number of edges leaving a node, counting choices and outcomes.
    pub fn out_degree(&self, node: &str) -> usize {
        self.edges.iter().filter(|edge| edge.source == node).count()
    }

    /// Steps from the start node, if reachable. Missing targets that are
    /// referenced from reachable nodes get a depth too.
    pub fn depth(&self, node: &NodeId) -> Option<usize> {
        self.depths.get(node).copied()
    }

    /// Referenced targets that do not exist.
    pub fn missing(&self) -> &BTreeSet<NodeId> {
        &self.missing
    }

    /// Existing nodes the start node cannot reach.
    pub fn unreachable(&self) -> &[NodeId] {
        &self.unreachable
    }

    /// Reachable node ids grouped by depth.
    pub fn layers(&self) -> BTreeMap<usize, Vec<NodeId>> {
        let mut layers: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for (id, depth) in &self.depths {
            layers.entry(*depth).or_default().push(id.clone());
        }
        layers
    }

    /// Deepest reachable layer.
    pub fn max_depth(&self) -> usize {
        self.depths.values().copied().max().unwrap_or(0)
    }
}

fn breadth_first_depths(document: &StoryDocument) -> BTreeMap<NodeId, usize> {
    let mut depths = BTreeMap::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([(document.start_node.clone(), 0usize)]);

    while let Some((id, depth)) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if let Some(node) = document.node(id.as_str()) {
            for target in node.targets() {
                if !seen.contains(target) {
                    queue.push_back((target.clone(), depth + 1));
                }
            }
        }
        depths.insert(id, depth);
    }
    depths
}
