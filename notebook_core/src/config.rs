//! Configuration for the notebook core, loaded from TOML.
//!
//! ```toml
//! [store]
//! path = "academy.db"
//! seed_on_open = true
//!
//! [notebook]
//! dedupe_entries = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::NotebookError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    pub store: StoreConfig,
    pub notebook: NotebookSettings,
}

/// Where lessons, notebooks and progress are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file. `None` keeps everything in memory.
    pub path: Option<PathBuf>,
    /// Seed the lesson store from the static catalog when opening.
    pub seed_on_open: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed_on_open: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookSettings {
    /// Skip extracted entries whose content is already in the notebook.
    pub dedupe_entries: bool,
}

impl Default for NotebookSettings {
    fn default() -> Self {
        Self { dedupe_entries: true }
    }
}

impl NotebookConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, NotebookError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NotebookError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotebookConfig::default();
        assert!(config.store.path.is_none());
        assert!(config.store.seed_on_open);
        assert!(config.notebook.dedupe_entries);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        assert_eq!(NotebookConfig::from_toml_str("").unwrap(), NotebookConfig::default());
    }

    #[test]
    fn test_partial_source() {
        let config = NotebookConfig::from_toml_str(
            r#"
            [store]
            path = "/tmp/academy.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/academy.db")));
        assert!(config.store.seed_on_open);
        assert!(config.notebook.dedupe_entries);
    }

    #[test]
    fn test_invalid_source() {
        assert!(matches!(
            NotebookConfig::from_toml_str("[store]\nseed_on_open = \"yes\""),
            Err(NotebookError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.toml");
        std::fs::write(&path, "[notebook]\ndedupe_entries = false\n").unwrap();

        let config = NotebookConfig::load(&path).unwrap();
        assert!(!config.notebook.dedupe_entries);

        assert!(matches!(
            NotebookConfig::load(dir.path().join("missing.toml")),
            Err(NotebookError::Io(_))
        ));
    }
}
