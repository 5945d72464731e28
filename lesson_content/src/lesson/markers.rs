//! Marker-text parsing for fill-in-the-blank exercises.
//!
//! Blanks are written as `{{word}}` spans. Spans never nest or overlap. An
//! open marker with no matching close marker ends the scan and everything
//! from there on, the marker included, is kept as literal text.

use serde::{Deserialize, Serialize};

pub const OPEN_MARKER: &str = "{{";
pub const CLOSE_MARKER: &str = "}}";

/// One unit of parsed marker text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    /// Text shown as-is. Never empty.
    Literal(String),
    /// A blank the player fills; holds the correct word.
    Blank(String),
}

impl Segment {
    pub fn is_blank(&self) -> bool {
        matches!(self, Segment::Blank(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Segment::Literal(s) | Segment::Blank(s) => s,
        }
    }
}

/// Result of parsing marker text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerText {
    /// Blank words in text order.
    pub correct_words: Vec<String>,
    /// Literal and blank segments in text order.
    pub segments: Vec<Segment>,
}

impl MarkerText {
    pub fn blank_count(&self) -> usize {
        self.correct_words.len()
    }

    /// Rebuild the text, rendering each blank through `blank`.
    pub fn render<F>(&self, mut blank: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Blank(word) => out.push_str(&blank(word)),
            }
        }
        out
    }
}

/// Parse `text` into its blanks and segments.
pub fn parse_marker_text(text: &str) -> MarkerText {
    let mut parsed = MarkerText::default();
    let mut rest = text;

    while let Some(open) = rest.find(OPEN_MARKER) {
        let after_open = &rest[open + OPEN_MARKER.len()..];
        let Some(close) = after_open.find(CLOSE_MARKER) else {
            break;
        };

        push_literal(&mut parsed.segments, &rest[..open]);
        let word = &after_open[..close];
        parsed.correct_words.push(word.to_string());
        parsed.segments.push(Segment::Blank(word.to_string()));

        rest = &after_open[close + CLOSE_MARKER.len()..];
    }

    push_literal(&mut parsed.segments, rest);
    parsed
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
}
