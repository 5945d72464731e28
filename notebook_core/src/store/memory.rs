//! In-memory lesson store.

use std::collections::BTreeMap;

use super::{LessonStore, PersistedLessonRecord};
use crate::error::NotebookError;

/// A [`LessonStore`] kept entirely in memory, with the same staging
/// semantics as the SQLite store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, PersistedLessonRecord>,
    pending: Vec<PersistedLessonRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose committed contents are exactly `records`.
    ///
    /// Records are taken as-is, so this can hold sections that fail to decode.
    pub fn with_records(records: impl IntoIterator<Item = PersistedLessonRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.building_name.clone(), r))
                .collect(),
            pending: Vec::new(),
        }
    }

    pub fn remove(&mut self, building_name: &str) -> Option<PersistedLessonRecord> {
        self.records.remove(building_name)
    }
}

impl LessonStore for MemoryStore {
    fn count(&self) -> Result<usize, NotebookError> {
        Ok(self.records.len())
    }

    fn insert(&mut self, record: PersistedLessonRecord) -> Result<(), NotebookError> {
        let staged = self
            .pending
            .iter()
            .any(|r| r.building_name == record.building_name);
        if staged || self.records.contains_key(&record.building_name) {
            return Err(NotebookError::DuplicateLesson(record.building_name));
        }
        self.pending.push(record);
        Ok(())
    }

    fn fetch(&self, building_name: &str) -> Result<Option<PersistedLessonRecord>, NotebookError> {
        Ok(self.records.get(building_name).cloned())
    }

    fn fetch_first(&self, limit: usize) -> Result<Vec<PersistedLessonRecord>, NotebookError> {
        Ok(self.records.values().take(limit).cloned().collect())
    }

    fn commit(&mut self) -> Result<(), NotebookError> {
        for record in self.pending.drain(..) {
            self.records.insert(record.building_name.clone(), record);
        }
        Ok(())
    }
}
