//! The story catalog (`stories.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::documents::STORY_FILE;
use crate::error::{StoreError, StoreResult};

/// File name of the catalog inside the stories root.
pub const CATALOG_FILE: &str = "stories.json";

/// Catalog entry for one story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryInfo {
    /// Story id, also its directory name.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short blurb.
    #[serde(default)]
    pub description: String,
    /// Author credit.
    #[serde(default)]
    pub author: String,
    /// Unfinished stories are hidden from the published list.
    #[serde(default, rename = "work-in-progress")]
    pub work_in_progress: bool,
}

impl StoryInfo {
    /// Entry with only an id; the id doubles as the title.
    pub fn untitled(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            description: String::new(),
            author: String::new(),
            work_in_progress: false,
        }
    }
}

/// All known stories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Entries in catalog order.
    pub stories: Vec<StoryInfo>,
}

impl Catalog {
    /// Read `<root>/stories.json`.
    pub fn load(root: &Path) -> StoreResult<Self> {
        let path = root.join(CATALOG_FILE);
        let json = std::fs::read_to_string(&path).map_err(|err| StoreError::io(&path, err))?;
        serde_json::from_str(&json).map_err(|err| StoreError::json(&path, err))
    }

    /// Read the catalog, or list every `<root>/<id>/story.json` when there
    /// is no catalog file.
    pub fn load_or_discover(root: &Path) -> StoreResult<Self> {
        if root.join(CATALOG_FILE).exists() {
            return Self::load(root);
        }

        let entries = std::fs::read_dir(root).map_err(|err| StoreError::io(root, err))?;
        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(STORY_FILE).is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        ids.sort();

        Ok(Self {
            stories: ids.into_iter().map(StoryInfo::untitled).collect(),
        })
    }

    /// Stories that are not marked work-in-progress.
    pub fn published(&self) -> impl Iterator<Item = &StoryInfo> {
        self.stories.iter().filter(|story| !story.work_in_progress)
    }

    /// Look up a story by id.
    pub fn find(&self, id: &str) -> Option<&StoryInfo> {
        self.stories.iter().find(|story| story.id == id)
    }
}
