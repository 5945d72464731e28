//! Error types for the notebook core.

use lesson_content::ContentError;
use thiserror::Error;

use crate::notebook::EntryId;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("Storage error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lesson already stored for building: {0}")]
    DuplicateLesson(String),

    #[error("Notebook entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Database schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: i32, supported: i32 },

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}
