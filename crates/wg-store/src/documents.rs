//! Loading story documents by id.

use std::path::{Path, PathBuf};

use tracing::debug;
use wg_core::StoryDocument;

use crate::error::{StoreError, StoreResult};

/// File name of a story document inside its story directory.
pub const STORY_FILE: &str = "story.json";

/// Something that can load a story document by id.
pub trait DocumentStore {
    /// Load and parse a story. Fails with [`StoreError::StoryNotFound`] if
    /// there is no document for the id.
    fn load(&self, story_id: &str) -> StoreResult<StoryDocument>;
}

/// Stories laid out as `<root>/<story id>/story.json`.
#[derive(Debug, Clone)]
pub struct DirDocumentStore {
    root: PathBuf,
}

impl DirDocumentStore {
    /// Serve stories from the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a story's document. `None` for ids that are not a plain
    /// directory name.
    pub fn story_path(&self, story_id: &str) -> Option<PathBuf> {
        is_plain_id(story_id).then(|| self.root.join(story_id).join(STORY_FILE))
    }
}

/// Whether a story id is a plain file name that cannot escape its directory.
pub(crate) fn is_plain_id(story_id: &str) -> bool {
    !story_id.is_empty() && !story_id.contains(['/', '\\']) && story_id != "." && story_id != ".."
}

impl DocumentStore for DirDocumentStore {
    fn load(&self, story_id: &str) -> StoreResult<StoryDocument> {
        let path = self
            .story_path(story_id)
            .ok_or_else(|| StoreError::StoryNotFound(story_id.to_string()))?;
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::StoryNotFound(story_id.to_string()));
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };
        let document = StoryDocument::from_json(&json).map_err(|source| StoreError::InvalidStory {
            id: story_id.to_string(),
            source,
        })?;
        debug!(story = story_id, nodes = document.node_count(), "loaded story");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_story(root: &Path, id: &str, json: &str) {
        std::fs::create_dir_all(root.join(id)).unwrap();
        std::fs::write(root.join(id).join(STORY_FILE), json).unwrap();
    }

    #[test]
    fn load_existing_story() {
        let dir = TempDir::new().unwrap();
        write_story(
            dir.path(),
            "tiny",
            r#"{ "startNode": "a", "nodes": { "a": { "text": "The end.", "isEnd": true } } }"#,
        );
        let store = DirDocumentStore::new(dir.path());
        let doc = store.load("tiny").unwrap();
        assert_eq!(doc.start_node, "a");
    }

    #[test]
    fn unknown_story_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = DirDocumentStore::new(dir.path());
        assert!(matches!(store.load("nope"), Err(StoreError::StoryNotFound(id)) if id == "nope"));
    }

    #[test]
    fn path_like_ids_are_not_found() {
        let dir = TempDir::new().unwrap();
        let store = DirDocumentStore::new(dir.path());
        for id in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(store.load(id), Err(StoreError::StoryNotFound(_))));
        }
    }

    #[test]
    fn malformed_story_is_invalid() {
        let dir = TempDir::new().unwrap();
        write_story(dir.path(), "broken", r#"{ "startNode": "a", "nodes": { "a": { "text": "?" } } }"#);
        let store = DirDocumentStore::new(dir.path());
        assert!(matches!(
            store.load("broken"),
            Err(StoreError::InvalidStory { id, .. }) if id == "broken"
        ));
    }
}
