//! Filesystem stores for Wegweiser.
//!
//! Stories live in a root directory as `<id>/story.json`, listed by an
//! optional `stories.json` catalog. Save slots are JSON files named
//! `<id>-save.json`; saves written by older players are upgraded on load.

/// The story catalog.
pub mod catalog;
/// Filesystem layout configuration.
pub mod config;
/// Story document loading.
pub mod documents;
/// Error types for the stores.
pub mod error;
/// Upgrades for older save files.
pub mod migrate;
/// Save slots on disk.
pub mod saves;

/// Re-export catalog types.
pub use catalog::{Catalog, StoryInfo};
/// Re-export the layout configuration.
pub use config::StoreConfig;
/// Re-export document stores.
pub use documents::{DirDocumentStore, DocumentStore};
/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export the parsed save.
pub use migrate::SavedGame;
/// Re-export the file save store.
pub use saves::FileSaveStore;
