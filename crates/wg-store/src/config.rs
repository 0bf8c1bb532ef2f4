//! Where stories and saves live on disk.

use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::documents::DirDocumentStore;
use crate::error::StoreResult;
use crate::saves::FileSaveStore;

/// Directory name used for saves when none is configured.
pub const DEFAULT_SAVES_DIR: &str = ".saves";

/// Filesystem layout for a stories root and its save slots.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root containing `stories.json` and one directory per story.
    pub stories_dir: PathBuf,
    /// Directory holding `<story id>-save.json` files.
    pub saves_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl StoreConfig {
    /// Layout rooted at `stories_dir`, with saves in `<stories_dir>/.saves`.
    pub fn new(stories_dir: impl Into<PathBuf>) -> Self {
        let stories_dir = stories_dir.into();
        Self {
            saves_dir: stories_dir.join(DEFAULT_SAVES_DIR),
            stories_dir,
        }
    }

    /// Use a different saves directory.
    pub fn with_saves_dir(mut self, saves_dir: impl Into<PathBuf>) -> Self {
        self.saves_dir = saves_dir.into();
        self
    }

    /// Document store over the stories root.
    pub fn documents(&self) -> DirDocumentStore {
        DirDocumentStore::new(&self.stories_dir)
    }

    /// Save store over the saves directory.
    pub fn saves(&self) -> FileSaveStore {
        FileSaveStore::new(&self.saves_dir)
    }

    /// The catalog of the stories root.
    pub fn catalog(&self) -> StoreResult<Catalog> {
        Catalog::load_or_discover(&self.stories_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_config() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.stories_dir, Path::new("."));
        assert_eq!(cfg.saves_dir, Path::new("./.saves"));
    }

    #[test]
    fn builder_methods() {
        let cfg = StoreConfig::new("public").with_saves_dir("/tmp/wg");
        assert_eq!(cfg.stories_dir, Path::new("public"));
        assert_eq!(cfg.saves().dir(), Path::new("/tmp/wg"));
        assert_eq!(cfg.documents().root(), Path::new("public"));
    }
}
