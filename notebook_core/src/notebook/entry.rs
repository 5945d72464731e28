//! Notebook entry definitions - the knowledge records a player collects.

use chrono::{DateTime, Utc};
use lesson_content::{BuildingId, ScienceTopic, UnknownLabel};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for notebook entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Create a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of notebook entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryType {
    /// Distilled from a reading section.
    KeyFact,
    FunFact,
    /// Terms from fill-in-the-blank exercises or the glossary.
    Vocabulary,
    ScienceConcept,
    /// A question with its correct answer and explanation.
    QuizResult,
    /// Written by the player.
    UserNote,
    /// Cross-referenced from a station lesson.
    EnvironmentNote,
}

impl EntryType {
    pub const ALL: [EntryType; 7] = [
        EntryType::KeyFact,
        EntryType::FunFact,
        EntryType::Vocabulary,
        EntryType::ScienceConcept,
        EntryType::QuizResult,
        EntryType::UserNote,
        EntryType::EnvironmentNote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::KeyFact => "keyFact",
            EntryType::FunFact => "funFact",
            EntryType::Vocabulary => "vocabulary",
            EntryType::ScienceConcept => "scienceConcept",
            EntryType::QuizResult => "quizResult",
            EntryType::UserNote => "userNote",
            EntryType::EnvironmentNote => "environmentNote",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// A single knowledge record attributed to a building.
///
/// Entries are append-only: after creation only `user_annotation` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookEntry {
    pub id: EntryId,
    pub building_id: BuildingId,
    pub entry_type: EntryType,
    pub topic: Option<ScienceTopic>,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub user_annotation: Option<String>,
}

impl NotebookEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(
        building_id: BuildingId,
        entry_type: EntryType,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            building_id,
            entry_type,
            topic: None,
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
            user_annotation: None,
        }
    }

    /// A note written by the player.
    pub fn user_note(building_id: BuildingId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(building_id, EntryType::UserNote, title, body)
    }

    /// Set the topic tag.
    pub fn with_topic(mut self, topic: impl Into<Option<ScienceTopic>>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Set the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Attach or replace the player's annotation.
    pub fn annotate(&mut self, annotation: impl Into<String>) {
        self.user_annotation = Some(annotation.into());
    }

    pub fn clear_annotation(&mut self) {
        self.user_annotation = None;
    }

    /// Whether two entries record the same knowledge, ignoring identity,
    /// timestamps and annotations.
    pub fn same_content(&self, other: &NotebookEntry) -> bool {
        self.building_id == other.building_id
            && self.entry_type == other.entry_type
            && self.topic == other.topic
            && self.title == other.title
            && self.body == other.body
    }
}
