use crate::document::NodeId;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors raised while loading a story or walking its graph.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// No story document exists for the given id.
    #[error("story not found: \"{0}\"")]
    NotFound(String),

    /// The document's start node does not exist.
    #[error("start node \"{0}\" does not exist")]
    MissingStartNode(NodeId),

    /// A resumed state references a node the document does not contain.
    #[error("saved state references unknown node \"{node}\"")]
    InvalidState {
        /// The unknown node id.
        node: NodeId,
    },

    /// A choice was taken without holding the item it requires.
    #[error("choice requires item \"{item}\"")]
    ItemRequired {
        /// The missing item id.
        item: String,
    },

    /// No outcome of a roll covers the drawn value.
    #[error("no outcome of roll at \"{node}\" matches draw {draw}")]
    NoMatchingOutcome {
        /// The roll node.
        node: NodeId,
        /// The value that was drawn.
        draw: u32,
    },

    /// A transition targets a node that does not exist.
    #[error("\"{from}\" leads to missing node \"{target}\"")]
    DanglingReference {
        /// The node the transition leaves.
        from: NodeId,
        /// The unresolved target.
        target: NodeId,
    },

    /// The choice index is out of range for the current node.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// The current node does not offer choices.
    #[error("\"{0}\" is not a choice node")]
    NotAChoiceNode(NodeId),

    /// The current node has no roll.
    #[error("\"{0}\" is not a roll node")]
    NotARollNode(NodeId),

    /// A node in the document is malformed.
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// A roll outcome range could not be parsed.
    #[error("invalid range: \"{0}\"")]
    InvalidRange(String),

    /// The document is not valid JSON or does not match the schema.
    #[error("failed to parse story: {0}")]
    Parse(#[from] serde_json::Error),
}
