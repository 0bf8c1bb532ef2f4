pub mod check;
pub mod graph;
pub mod list;
pub mod play;
pub mod reset;

use std::path::PathBuf;

use wg_core::StoryDocument;
use wg_store::{DocumentStore, StoreConfig};

/// Build the store layout from the `--dir` and `--saves` flags.
pub fn store_config(dir: PathBuf, saves: Option<PathBuf>) -> StoreConfig {
    let config = StoreConfig::new(dir);
    match saves {
        Some(saves) => config.with_saves_dir(saves),
        None => config,
    }
}

/// Load a story document by id.
fn load_story(config: &StoreConfig, story: &str) -> Result<StoryDocument, String> {
    config.documents().load(story).map_err(|e| e.to_string())
}
