//! Payload definitions for each kind of lesson section.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::markers::{parse_marker_text, MarkerText, Segment};
use crate::buildings::ScienceTopic;

/// Maximum number of progressive hints a question may carry.
pub const MAX_HINTS: usize = 3;

/// A page of explanatory text. `text` may contain inline `**bold**` markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<ScienceTopic>,
    /// Asset name of an illustration shown beside the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ReadingContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: text.into(),
            topic: None,
            illustration: None,
            caption: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_topic(mut self, topic: ScienceTopic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_illustration(mut self, illustration: impl Into<String>, caption: Option<String>) -> Self {
        self.illustration = Some(illustration.into());
        self.caption = caption;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFactContent {
    pub text: String,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContent {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    pub explanation: String,
    pub topic: ScienceTopic,
    /// Progressive hints, revealed one at a time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

impl QuestionContent {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
        topic: ScienceTopic,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            correct_index,
            explanation: explanation.into(),
            topic,
            hints: None,
        }
    }

    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = Some(hints);
        self
    }

    /// The option at `correct_index`, if the index is valid.
    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    /// The `n`th hint (zero-based), if one exists.
    pub fn hint(&self, n: usize) -> Option<&str> {
        self.hints.as_ref()?.get(n).map(String::as_str)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!(
                "question needs at least 2 options, found {}",
                self.options.len()
            ));
        }
        if self.correct_index >= self.options.len() {
            return Err(format!(
                "correct index {} out of range for {} options",
                self.correct_index,
                self.options.len()
            ));
        }
        if let Some(hints) = &self.hints {
            if hints.len() > MAX_HINTS {
                return Err(format!("question has {} hints, at most {MAX_HINTS} allowed", hints.len()));
            }
        }
        Ok(())
    }
}

/// Cloze exercise. Blanks are written inline as `{{word}}` spans in `text`.
///
/// Only the marker text and distractors are stored; correct words, segments
/// and the word bank are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInBlanksContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default)]
    pub distractors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<ScienceTopic>,
}

impl FillInBlanksContent {
    pub fn new(text: impl Into<String>, distractors: Vec<String>) -> Self {
        Self {
            title: None,
            text: text.into(),
            distractors,
            topic: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_topic(mut self, topic: ScienceTopic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn parsed(&self) -> MarkerText {
        parse_marker_text(&self.text)
    }

    /// Blank words in text order.
    pub fn correct_words(&self) -> Vec<String> {
        self.parsed().correct_words
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.parsed().segments
    }

    /// Correct words plus distractors in a fresh random order.
    ///
    /// Call once per presentation; the result must not be stored.
    pub fn word_bank(&self) -> Vec<String> {
        self.word_bank_with(&mut rand::thread_rng())
    }

    /// [`word_bank`](Self::word_bank) with a caller-supplied RNG.
    pub fn word_bank_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut bank = self.correct_words();
        bank.extend(self.distractors.iter().cloned());
        bank.shuffle(rng);
        bank
    }

    /// The text with every blank replaced by its `**word**` in bold markup.
    pub fn emphasized_text(&self) -> String {
        self.parsed().render(|word| format!("**{word}**"))
    }

    /// The text with every blank filled in, without markup.
    pub fn plain_text(&self) -> String {
        self.parsed().render(str::to_string)
    }
}

/// Places an environment prompt can send the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentDestination {
    Workshop,
    Forest,
    CraftingRoom,
}

/// Invites the player to leave the lesson and visit another environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPromptContent {
    pub destination: EnvironmentDestination,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuriosityQuestion {
    pub question: String,
    pub answer: String,
}

/// Ordered "I wonder..." questions with their answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuriosityContent {
    pub questions: Vec<CuriosityQuestion>,
}

/// The step-by-step math visualizations, two per building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MathVisualType {
    AqueductGradient,
    AqueductArchSpan,
    ColosseumEllipse,
    ColosseumSeating,
    BathsHeatFlow,
    BathsPoolVolume,
    PantheonDome,
    PantheonOculus,
    RoadLayers,
    RoadCamber,
    HarborBreakwater,
    HarborBuoyancy,
    SiegeTrajectory,
    SiegeLever,
    InsulaFloorArea,
    InsulaLoad,
    GlassMeltRatio,
    GlassRefraction,
    LighthouseBeam,
    LighthouseHorizon,
    SundialShadow,
    SundialAngle,
    GranaryVolume,
    GranaryVentilation,
    BakeryDoughRatio,
    BakeryOvenHeat,
    TanneryConcentration,
    TanneryCuringTime,
    WinePressLever,
    WinePressYield,
    OdeonEcho,
    OdeonSightline,
    ForumGrid,
    ForumProportion,
}

/// A worked math visualization stepped through one frame at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathVisualContent {
    pub visual_type: MathVisualType,
    pub title: String,
    pub topic: ScienceTopic,
    pub total_steps: u32,
    pub caption: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_question() -> QuestionContent {
        QuestionContent::new(
            "What keeps water flowing along an aqueduct?",
            vec!["Pumps".into(), "A gentle downhill slope".into(), "Wind".into()],
            1,
            "Roman engineers relied on gravity alone.",
            ScienceTopic::Hydraulics,
        )
    }

    #[test]
    fn test_question_correct_answer() {
        let question = sample_question();
        assert_eq!(question.correct_answer(), Some("A gentle downhill slope"));
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
        assert!(question.validate().is_ok());
    }

    #[test]
    fn test_question_validation() {
        let mut question = sample_question();
        question.correct_index = 3;
        assert!(question.validate().is_err());

        let mut question = sample_question();
        question.options.truncate(1);
        question.correct_index = 0;
        assert!(question.validate().is_err());

        let question = sample_question()
            .with_hints(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_hints() {
        let question = sample_question().with_hints(vec!["Think about gravity.".into()]);
        assert_eq!(question.hint(0), Some("Think about gravity."));
        assert_eq!(question.hint(1), None);
        assert_eq!(sample_question().hint(0), None);
    }

    #[test]
    fn test_word_bank_is_permutation() {
        let blanks = FillInBlanksContent::new(
            "Emperor {{Hadrian}} built the {{Pantheon}}",
            vec!["Nero".into(), "Colosseum".into(), "Hadrian".into()],
        );

        let mut bank = blanks.word_bank();
        assert_eq!(bank.len(), 5);

        let mut expected = vec!["Hadrian", "Pantheon", "Nero", "Colosseum", "Hadrian"];
        bank.sort();
        expected.sort();
        assert_eq!(bank, expected);
    }

    #[test]
    fn test_word_bank_with_seeded_rng() {
        let blanks = FillInBlanksContent::new("{{a}} {{b}} {{c}}", vec!["d".into(), "e".into()]);

        let first = blanks.word_bank_with(&mut StdRng::seed_from_u64(7));
        let second = blanks.word_bank_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        // Derived words are unaffected by shuffling.
        assert_eq!(blanks.correct_words(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_emphasized_and_plain_text() {
        let blanks = FillInBlanksContent::new("Concrete uses {{lime}} and {{ash}}.", vec![]);
        assert_eq!(blanks.emphasized_text(), "Concrete uses **lime** and **ash**.");
        assert_eq!(blanks.plain_text(), "Concrete uses lime and ash.");
    }
}
