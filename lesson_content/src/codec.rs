//! Interchange codec for lesson sections.
//!
//! Sections are encoded as a JSON array of `{"type": <kind>, "data": {...}}`
//! objects. Decoding reads the tag first and dispatches to the matching
//! payload; an unknown tag, a missing required field or a section that fails
//! validation is a [`ContentError`], never a silent default.

use crate::error::ContentError;
use crate::lesson::LessonSection;

/// Encode an ordered section list.
pub fn encode_sections(sections: &[LessonSection]) -> Result<Vec<u8>, ContentError> {
    serde_json::to_vec(sections).map_err(ContentError::Encode)
}

/// Decode an ordered section list produced by [`encode_sections`].
pub fn decode_sections(bytes: &[u8]) -> Result<Vec<LessonSection>, ContentError> {
    let sections: Vec<LessonSection> = serde_json::from_slice(bytes).map_err(ContentError::Decode)?;
    for (index, section) in sections.iter().enumerate() {
        section.validate(index)?;
    }
    Ok(sections)
}

pub fn encode_section(section: &LessonSection) -> Result<Vec<u8>, ContentError> {
    serde_json::to_vec(section).map_err(ContentError::Encode)
}

pub fn decode_section(bytes: &[u8]) -> Result<LessonSection, ContentError> {
    let section: LessonSection = serde_json::from_slice(bytes).map_err(ContentError::Decode)?;
    section.validate(0)?;
    Ok(section)
}
