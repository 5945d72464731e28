//! Persistent content store.
//!
//! Lessons are stored one record per building, keyed by exact building name,
//! with their sections in the interchange encoding. Inserts are staged and
//! become visible to `count`/`fetch` once `commit` succeeds.

mod entries;
mod lessons;
mod memory;
mod progress;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use schema::SCHEMA_VERSION;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use lesson_content::{decode_sections, encode_sections, ContentError, Lesson};
use serde::{Deserialize, Serialize};

use crate::error::NotebookError;

/// A building's lesson as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLessonRecord {
    /// Unique key.
    pub building_name: String,
    pub title: String,
    /// Sections in the interchange encoding.
    pub sections: Vec<u8>,
    pub last_modified: DateTime<Utc>,
    /// Starts at [`INITIAL_VERSION`](Self::INITIAL_VERSION); reserved for migrations.
    pub version: u32,
}

impl PersistedLessonRecord {
    pub const INITIAL_VERSION: u32 = 1;

    /// Encode a lesson into a fresh record.
    pub fn from_lesson(lesson: &Lesson) -> Result<Self, ContentError> {
        Ok(Self {
            building_name: lesson.building_name.clone(),
            title: lesson.title.clone(),
            sections: encode_sections(&lesson.sections)?,
            last_modified: Utc::now(),
            version: Self::INITIAL_VERSION,
        })
    }

    /// Decode the record back into a lesson.
    pub fn to_lesson(&self) -> Result<Lesson, ContentError> {
        Ok(Lesson {
            building_name: self.building_name.clone(),
            title: self.title.clone(),
            sections: decode_sections(&self.sections)?,
        })
    }
}

/// The storage operations the content library needs.
pub trait LessonStore {
    /// Number of committed lesson records.
    fn count(&self) -> Result<usize, NotebookError>;

    /// Stage a record for the next commit.
    ///
    /// Fails with [`NotebookError::DuplicateLesson`] if the building already
    /// has a committed or staged record.
    fn insert(&mut self, record: PersistedLessonRecord) -> Result<(), NotebookError>;

    /// Look up a committed record by exact building name.
    fn fetch(&self, building_name: &str) -> Result<Option<PersistedLessonRecord>, NotebookError>;

    /// Up to `limit` committed records, ordered by building name.
    fn fetch_first(&self, limit: usize) -> Result<Vec<PersistedLessonRecord>, NotebookError>;

    /// Make every staged record visible.
    fn commit(&mut self) -> Result<(), NotebookError>;
}
