//! Knowledge extraction - turning lesson and station content into notebook entries.
//!
//! Each knowledge-bearing section yields exactly one entry; presentation-only
//! sections (environment prompts, curiosity questions, math visuals) yield none.

use lesson_content::{
    Building, BuildingId, Lesson, LessonSection, QuestionContent, ScienceTopic, VocabularyTerm,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{EntryType, NotebookEntry};

pub const DEFAULT_KEY_FACT_TITLE: &str = "Key Fact";
pub const FUN_FACT_TITLE: &str = "Fun Fact";
pub const DEFAULT_VOCABULARY_TITLE: &str = "Key Terms";

/// Topic-tagged content met outside a building's own lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationLesson {
    /// Short station name, e.g. "Forest Station".
    pub label: String,
    pub title: String,
    pub body: String,
    /// Ordered topic tags; the first is the entry's topic.
    pub tags: Vec<ScienceTopic>,
}

impl StationLesson {
    pub fn tag_set(&self) -> BTreeSet<ScienceTopic> {
        self.tags.iter().copied().collect()
    }

    /// Title shared by every entry this station produces.
    pub fn entry_title(&self) -> String {
        format!("{}: {}", self.label, self.title)
    }
}

/// Extract entries from a lesson, one per knowledge-bearing section, in section order.
pub fn entries_from_lesson(lesson: &Lesson, building_id: BuildingId) -> Vec<NotebookEntry> {
    lesson
        .sections
        .iter()
        .filter_map(|section| entry_from_section(section, building_id))
        .collect()
}

/// The entry a single section contributes, if any.
pub fn entry_from_section(section: &LessonSection, building_id: BuildingId) -> Option<NotebookEntry> {
    let entry = match section {
        LessonSection::Reading(reading) => NotebookEntry::new(
            building_id,
            EntryType::KeyFact,
            reading.title.as_deref().unwrap_or(DEFAULT_KEY_FACT_TITLE),
            reading.text.as_str(),
        )
        .with_topic(reading.topic),
        LessonSection::FunFact(fact) => {
            NotebookEntry::new(building_id, EntryType::FunFact, FUN_FACT_TITLE, fact.text.as_str())
        }
        LessonSection::Question(question) => NotebookEntry::new(
            building_id,
            EntryType::QuizResult,
            question.question.as_str(),
            quiz_result_body(question),
        )
        .with_topic(question.topic),
        LessonSection::FillInBlanks(blanks) => NotebookEntry::new(
            building_id,
            EntryType::Vocabulary,
            blanks.title.as_deref().unwrap_or(DEFAULT_VOCABULARY_TITLE),
            blanks.emphasized_text(),
        )
        .with_topic(blanks.topic),
        LessonSection::EnvironmentPrompt(_)
        | LessonSection::CuriosityQa(_)
        | LessonSection::MathVisual(_) => return None,
    };
    Some(entry)
}

fn quiz_result_body(question: &QuestionContent) -> String {
    format!(
        "{}\nAnswer: {}\n{}",
        question.question,
        question.correct_answer().unwrap_or_default(),
        question.explanation
    )
}

/// Cross-reference a station lesson into every building sharing one of its topics.
///
/// Buildings with no topic overlap get nothing; a station with no tags
/// produces no entries at all.
pub fn entries_from_station_lesson(station: &StationLesson, buildings: &[Building]) -> Vec<NotebookEntry> {
    let Some(first_tag) = station.tags.first().copied() else {
        return Vec::new();
    };
    let station_tags = station.tag_set();

    buildings
        .iter()
        .filter(|building| building.shared_topics(&station_tags).next().is_some())
        .map(|building| {
            NotebookEntry::new(
                building.id,
                EntryType::EnvironmentNote,
                station.entry_title(),
                station.body.as_str(),
            )
            .with_topic(first_tag)
        })
        .collect()
}

/// One vocabulary entry per glossary term.
pub fn entries_from_vocabulary(terms: &[VocabularyTerm], building_id: BuildingId) -> Vec<NotebookEntry> {
    terms
        .iter()
        .map(|term| {
            NotebookEntry::new(
                building_id,
                EntryType::Vocabulary,
                term.term.as_str(),
                term.definition.as_str(),
            )
            .with_topic(term.topic)
        })
        .collect()
}
