//! Player progress - the ephemeral progress value and its persisted projection.
//!
//! Set-valued fields are stored as plain string lists. Loading keeps only the
//! strings that name a known member of the closed set, so records written by
//! a newer build with more topics or phases still load.

use chrono::{DateTime, Utc};
use lesson_content::{BuildingId, BuildingPhase, ScienceTopic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

/// Progress through one building, as held by a running session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressValue {
    /// Topic badges earned.
    pub earned_topics: BTreeSet<ScienceTopic>,
    pub completed_phases: BTreeSet<BuildingPhase>,
    pub sketch_completed: bool,
    pub quiz_passed: bool,
    pub lesson_read: bool,
    /// Index of the lesson section the player is on.
    pub current_section: usize,
}

impl ProgressValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award a topic badge. Returns false if it was already earned.
    pub fn earn_topic(&mut self, topic: ScienceTopic) -> bool {
        self.earned_topics.insert(topic)
    }

    /// Mark a phase complete, keeping the matching flag in step.
    pub fn complete_phase(&mut self, phase: BuildingPhase) {
        match phase {
            BuildingPhase::Lesson => self.lesson_read = true,
            BuildingPhase::Quiz => self.quiz_passed = true,
            BuildingPhase::Sketch => self.sketch_completed = true,
            BuildingPhase::Build => {}
        }
        self.completed_phases.insert(phase);
    }

    pub fn is_phase_complete(&self, phase: BuildingPhase) -> bool {
        self.completed_phases.contains(&phase)
    }

    /// Whether every phase of the building is done.
    pub fn is_building_complete(&self) -> bool {
        BuildingPhase::ALL.iter().all(|p| self.completed_phases.contains(p))
    }
}

/// The flat stored form of a building's progress.
///
/// `reward_points` and `updated_at` are owned by other systems and are never
/// written by [`apply_progress`](Self::apply_progress).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProgressRecord {
    pub building_id: BuildingId,
    pub earned_topics: Vec<String>,
    pub completed_phases: Vec<String>,
    pub sketch_completed: bool,
    pub quiz_passed: bool,
    pub lesson_read: bool,
    pub current_section: usize,
    pub reward_points: u32,
    pub updated_at: DateTime<Utc>,
}

impl PersistedProgressRecord {
    /// A fresh record with nothing completed.
    pub fn new(building_id: BuildingId) -> Self {
        Self {
            building_id,
            earned_topics: Vec::new(),
            completed_phases: Vec::new(),
            sketch_completed: false,
            quiz_passed: false,
            lesson_read: false,
            current_section: 0,
            reward_points: 0,
            updated_at: Utc::now(),
        }
    }

    /// Rebuild the progress value, dropping unrecognized set members.
    pub fn to_progress_value(&self) -> ProgressValue {
        ProgressValue {
            earned_topics: decode_set(&self.earned_topics),
            completed_phases: decode_set(&self.completed_phases),
            sketch_completed: self.sketch_completed,
            quiz_passed: self.quiz_passed,
            lesson_read: self.lesson_read,
            current_section: self.current_section,
        }
    }

    /// Overwrite the fields represented in `value`.
    pub fn apply_progress(&mut self, value: &ProgressValue) {
        self.earned_topics = encode_set(&value.earned_topics);
        self.completed_phases = encode_set(&value.completed_phases);
        self.sketch_completed = value.sketch_completed;
        self.quiz_passed = value.quiz_passed;
        self.lesson_read = value.lesson_read;
        self.current_section = value.current_section;
    }
}

impl From<&PersistedProgressRecord> for ProgressValue {
    fn from(record: &PersistedProgressRecord) -> Self {
        record.to_progress_value()
    }
}

fn decode_set<T: FromStr + Ord>(raw: &[String]) -> BTreeSet<T> {
    raw.iter().filter_map(|s| s.parse().ok()).collect()
}

fn encode_set<T: Display>(set: &BTreeSet<T>) -> Vec<String> {
    set.iter().map(|member| member.to_string()).collect()
}
