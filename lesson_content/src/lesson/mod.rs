//! Lesson content model - the ordered, heterogeneous sections of a building's lesson.

pub mod markers;
mod sections;

pub use markers::{parse_marker_text, MarkerText, Segment};
pub use sections::*;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// One displayable unit of a lesson.
///
/// Serialized adjacently tagged as `{"type": ..., "data": {...}}`: the tag is
/// always read first and selects the payload type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum LessonSection {
    Reading(ReadingContent),
    FunFact(FunFactContent),
    Question(QuestionContent),
    FillInBlanks(FillInBlanksContent),
    EnvironmentPrompt(EnvironmentPromptContent),
    #[serde(rename = "curiosityQA")]
    CuriosityQa(CuriosityContent),
    MathVisual(MathVisualContent),
}

/// The variant tag of a [`LessonSection`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Reading,
    FunFact,
    Question,
    FillInBlanks,
    EnvironmentPrompt,
    #[serde(rename = "curiosityQA")]
    CuriosityQa,
    MathVisual,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Reading,
        SectionKind::FunFact,
        SectionKind::Question,
        SectionKind::FillInBlanks,
        SectionKind::EnvironmentPrompt,
        SectionKind::CuriosityQa,
        SectionKind::MathVisual,
    ];

    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Reading => "reading",
            SectionKind::FunFact => "funFact",
            SectionKind::Question => "question",
            SectionKind::FillInBlanks => "fillInBlanks",
            SectionKind::EnvironmentPrompt => "environmentPrompt",
            SectionKind::CuriosityQa => "curiosityQA",
            SectionKind::MathVisual => "mathVisual",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LessonSection {
    pub fn kind(&self) -> SectionKind {
        match self {
            LessonSection::Reading(_) => SectionKind::Reading,
            LessonSection::FunFact(_) => SectionKind::FunFact,
            LessonSection::Question(_) => SectionKind::Question,
            LessonSection::FillInBlanks(_) => SectionKind::FillInBlanks,
            LessonSection::EnvironmentPrompt(_) => SectionKind::EnvironmentPrompt,
            LessonSection::CuriosityQa(_) => SectionKind::CuriosityQa,
            LessonSection::MathVisual(_) => SectionKind::MathVisual,
        }
    }

    /// Check the invariants serde cannot express.
    ///
    /// `index` is the section's position in its lesson and is only used for
    /// the error report.
    pub fn validate(&self, index: usize) -> Result<(), ContentError> {
        let result = match self {
            LessonSection::Question(question) => question.validate(),
            LessonSection::MathVisual(visual) if visual.total_steps == 0 => {
                Err("math visual needs at least one step".to_string())
            }
            _ => Ok(()),
        };
        result.map_err(|reason| ContentError::InvalidSection { index, reason })
    }
}

/// A building's complete lesson. Section order is presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub building_name: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<LessonSection>,
}

impl Lesson {
    pub fn new(building_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            building_name: building_name.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: LessonSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// All sections of one kind, in lesson order.
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &LessonSection> {
        self.sections.iter().filter(move |s| s.kind() == kind)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ContentError> {
        self.sections
            .iter()
            .enumerate()
            .try_for_each(|(index, section)| section.validate(index))
    }
}
