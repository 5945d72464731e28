//! Building notebooks - the ordered collection of entries for one building.

use chrono::{DateTime, Utc};
use lesson_content::{Building, BuildingId, ScienceTopic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EntryId, EntryType, NotebookEntry};

/// All notebook entries collected for a building, in the order they were added.
///
/// Groupings by topic and by entry type are computed on read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingNotebook {
    pub building_id: BuildingId,
    pub building_name: String,
    entries: Vec<NotebookEntry>,
    pub last_modified: DateTime<Utc>,
}

impl BuildingNotebook {
    /// Create an empty notebook for a building.
    pub fn new(building: &Building) -> Self {
        Self {
            building_id: building.id,
            building_name: building.name.clone(),
            entries: Vec::new(),
            last_modified: Utc::now(),
        }
    }

    /// Rebuild a notebook from stored entries.
    pub fn from_entries(
        building_id: BuildingId,
        building_name: impl Into<String>,
        entries: Vec<NotebookEntry>,
    ) -> Self {
        let last_modified = entries
            .iter()
            .map(|e| e.created_at)
            .max()
            .unwrap_or_else(Utc::now);
        Self {
            building_id,
            building_name: building_name.into(),
            entries,
            last_modified,
        }
    }

    /// Append an entry.
    ///
    /// Returns the entry ID for reference.
    pub fn append(&mut self, entry: NotebookEntry) -> EntryId {
        let id = entry.id;
        self.entries.push(entry);
        self.touch();
        id
    }

    /// Append every entry whose content is not already in the notebook.
    ///
    /// Entries are only checked against what was recorded before this call,
    /// so two sections with the same text in one batch both land.
    /// Returns the entries that were added, in order.
    pub fn merge_entries(&mut self, entries: impl IntoIterator<Item = NotebookEntry>) -> Vec<&NotebookEntry> {
        let start = self.entries.len();
        for entry in entries {
            if !self.entries[..start].iter().any(|e| e.same_content(&entry)) {
                self.entries.push(entry);
            }
        }
        if self.entries.len() > start {
            self.touch();
        }
        self.entries[start..].iter().collect()
    }

    /// Check if an entry with the same content is already recorded.
    pub fn contains_content(&self, entry: &NotebookEntry) -> bool {
        self.entries.iter().any(|e| e.same_content(entry))
    }

    /// Set the annotation on an entry.
    pub fn annotate(&mut self, id: EntryId, annotation: impl Into<String>) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.annotate(annotation);
            self.touch();
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&NotebookEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[NotebookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one type, in notebook order.
    pub fn entries_of(&self, entry_type: EntryType) -> Vec<&NotebookEntry> {
        self.entries.iter().filter(|e| e.entry_type == entry_type).collect()
    }

    /// Entries tagged with a topic, in notebook order.
    pub fn entries_with_topic(&self, topic: ScienceTopic) -> Vec<&NotebookEntry> {
        self.entries.iter().filter(|e| e.topic == Some(topic)).collect()
    }

    /// Group entries by topic tag. Untagged entries are left out.
    pub fn by_topic(&self) -> BTreeMap<ScienceTopic, Vec<&NotebookEntry>> {
        let mut groups: BTreeMap<ScienceTopic, Vec<&NotebookEntry>> = BTreeMap::new();
        for entry in &self.entries {
            if let Some(topic) = entry.topic {
                groups.entry(topic).or_default().push(entry);
            }
        }
        groups
    }

    /// Group entries by entry type.
    pub fn by_type(&self) -> BTreeMap<EntryType, Vec<&NotebookEntry>> {
        let mut groups: BTreeMap<EntryType, Vec<&NotebookEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.entry_type).or_default().push(entry);
        }
        groups
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}
