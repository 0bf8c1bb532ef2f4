//! JSON save files, one per story.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use wg_core::{GameState, SaveStore};

use crate::documents::is_plain_id;
use crate::error::{StoreError, StoreResult};
use crate::migrate::{SavedGame, parse_save};

/// Save slots stored as `<dir>/<story id>-save.json`.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    dir: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveFile<'a> {
    #[serde(flatten)]
    state: &'a GameState,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl FileSaveStore {
    /// Store saves in the given directory; it is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a story's save slot. Fails with [`StoreError::InvalidId`]
    /// for ids that are not a plain file name.
    pub fn slot_path(&self, story_id: &str) -> StoreResult<PathBuf> {
        if !is_plain_id(story_id) {
            return Err(StoreError::InvalidId(story_id.to_string()));
        }
        Ok(self.dir.join(format!("{story_id}-save.json")))
    }

    /// Load a slot together with its metadata.
    pub fn load_saved(&self, story_id: &str) -> StoreResult<Option<SavedGame>> {
        let path = self.slot_path(story_id)?;
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::io(path, err)),
        };
        let saved = parse_save(&json).map_err(|err| StoreError::json(&path, err))?;
        if saved.migrated {
            info!(story = story_id, "upgraded legacy save history");
        }
        Ok(Some(saved))
    }
}

impl SaveStore for FileSaveStore {
    type Error = StoreError;

    fn load(&self, story_id: &str) -> StoreResult<Option<GameState>> {
        Ok(self.load_saved(story_id)?.map(|saved| saved.state))
    }

    fn save(&mut self, story_id: &str, state: &GameState) -> StoreResult<()> {
        let path = self.slot_path(story_id)?;
        std::fs::create_dir_all(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;
        let file = SaveFile {
            state,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|err| StoreError::json(&path, err))?;
        std::fs::write(&path, json).map_err(|err| StoreError::io(&path, err))?;
        debug!(story = story_id, path = %path.display(), "saved game state");
        Ok(())
    }

    fn clear(&mut self, story_id: &str) -> StoreResult<()> {
        let path = self.slot_path(story_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(story = story_id, "cleared save slot");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }
}
