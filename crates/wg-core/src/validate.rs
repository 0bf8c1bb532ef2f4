//! Authoring checks run over a whole document.

use std::collections::BTreeSet;

use crate::document::{NodeId, NodeKind, StoryDocument};
use crate::graph::StoryGraph;
use crate::roll::{OutcomeRange, RollSpec};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The story can break during play.
    Error,
    /// Probably an authoring mistake, but playable.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// `startNode` names no node.
    MissingStartNode(NodeId),
    /// A choice or outcome leads nowhere.
    DanglingReference {
        /// Node holding the reference.
        from: NodeId,
        /// Missing target.
        target: NodeId,
    },
    /// No path from the start node reaches this node.
    Unreachable(NodeId),
    /// Two outcomes of one roll share draw values.
    OverlappingOutcomes {
        /// The roll node.
        node: NodeId,
        /// Earlier outcome's range.
        first: OutcomeRange,
        /// Later outcome's range.
        second: OutcomeRange,
    },
    /// Draw values inside the roll's domain that no outcome covers.
    OutcomeGap {
        /// The roll node.
        node: NodeId,
        /// The uncovered values.
        gap: OutcomeRange,
    },
    /// A choice node without any choices.
    NoChoices(NodeId),
    /// A choice requires an item that no node grants.
    ItemNeverGranted {
        /// Node holding the choice.
        node: NodeId,
        /// The unobtainable item.
        item: String,
    },
    /// A collection milestone points at a missing node.
    MissingMilestone {
        /// Milestone id.
        milestone: String,
        /// Missing node.
        node: NodeId,
    },
}

impl Issue {
    /// Severity of this issue.
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingStartNode(_) | Self::DanglingReference { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStartNode(node) => write!(f, "start node \"{node}\" does not exist"),
            Self::DanglingReference { from, target } => {
                write!(f, "\"{from}\" leads to missing node \"{target}\"")
            }
            Self::Unreachable(node) => write!(f, "\"{node}\" cannot be reached from the start"),
            Self::OverlappingOutcomes {
                node,
                first,
                second,
            } => write!(f, "roll at \"{node}\": ranges {first} and {second} overlap"),
            Self::OutcomeGap { node, gap } => {
                write!(f, "roll at \"{node}\": no outcome covers {gap}")
            }
            Self::NoChoices(node) => write!(f, "\"{node}\" has no choices and is not an ending"),
            Self::ItemNeverGranted { node, item } => {
                write!(f, "\"{node}\" requires \"{item}\", which no node grants")
            }
            Self::MissingMilestone { milestone, node } => {
                write!(f, "milestone \"{milestone}\" points at missing node \"{node}\"")
            }
        }
    }
}

/// All issues found in a document.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Issues in discovery order.
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Issues with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
    }

    /// Issues with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Warning)
    }

    /// Whether any error was found.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Whether nothing at all was found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check a document for broken references and authoring mistakes.
pub fn validate(document: &StoryDocument) -> ValidationReport {
    let mut issues = Vec::new();

    if !document.contains(document.start_node.as_str()) {
        issues.push(Issue::MissingStartNode(document.start_node.clone()));
    }

    let graph = StoryGraph::build(document);
    for edge in graph.edges() {
        if graph.missing().contains(&edge.target) {
            issues.push(Issue::DanglingReference {
                from: edge.source.clone(),
                target: edge.target.clone(),
            });
        }
    }

    let granted: BTreeSet<&str> = document
        .nodes
        .values()
        .filter_map(|node| node.collect_item.as_deref())
        .collect();

    for (id, node) in &document.nodes {
        match &node.kind {
            NodeKind::Choice(choices) if choices.is_empty() => {
                issues.push(Issue::NoChoices(id.clone()));
            }
            NodeKind::Choice(choices) => {
                let required: BTreeSet<&str> =
                    choices.iter().filter_map(|c| c.item.as_deref()).collect();
                for item in required {
                    if !granted.contains(item) {
                        issues.push(Issue::ItemNeverGranted {
                            node: id.clone(),
                            item: item.to_string(),
                        });
                    }
                }
            }
            NodeKind::Roll(roll) => check_roll(id, roll, &mut issues),
            NodeKind::End { .. } => {}
        }
    }

    if document.contains(document.start_node.as_str()) {
        issues.extend(graph.unreachable().iter().cloned().map(Issue::Unreachable));
    }

    if let Some(progress) = &document.progress {
        for milestone in &progress.milestones {
            if !document.contains(milestone.node.as_str()) {
                issues.push(Issue::MissingMilestone {
                    milestone: milestone.id.clone(),
                    node: milestone.node.clone(),
                });
            }
        }
    }

    ValidationReport { issues }
}

fn check_roll(id: &NodeId, roll: &RollSpec, issues: &mut Vec<Issue>) {
    for (i, first) in roll.outcomes.iter().enumerate() {
        for second in &roll.outcomes[i + 1..] {
            if first.range.overlaps(&second.range) {
                issues.push(Issue::OverlappingOutcomes {
                    node: id.clone(),
                    first: first.range,
                    second: second.range,
                });
            }
        }
    }

    let mut ranges: Vec<OutcomeRange> = roll.outcomes.iter().map(|o| o.range).collect();
    ranges.sort_by_key(|range| range.min);
    let Some(first) = ranges.first() else {
        return;
    };
    let mut covered_to = first.max;
    for range in &ranges[1..] {
        if range.min > covered_to.saturating_add(1) {
            issues.push(Issue::OutcomeGap {
                node: id.clone(),
                gap: OutcomeRange {
                    min: covered_to + 1,
                    max: range.min - 1,
                },
            });
        }
        covered_to = covered_to.max(range.max);
    }
}

impl StoryDocument {
    /// Check this document; see [`validate`].
    pub fn validate(&self) -> ValidationReport {
        validate(self)
    }
}
