//! Topic tags and building phases: the closed label sets shared by content,
//! notebooks and progress.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fields of science a piece of content can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScienceTopic {
    Mathematics,
    Physics,
    Chemistry,
    Geology,
    Hydraulics,
    Optics,
    Materials,
    Architecture,
    Engineering,
    Astronomy,
    Biology,
    Acoustics,
}

impl ScienceTopic {
    /// Every topic, in declaration order.
    pub const ALL: [ScienceTopic; 12] = [
        ScienceTopic::Mathematics,
        ScienceTopic::Physics,
        ScienceTopic::Chemistry,
        ScienceTopic::Geology,
        ScienceTopic::Hydraulics,
        ScienceTopic::Optics,
        ScienceTopic::Materials,
        ScienceTopic::Architecture,
        ScienceTopic::Engineering,
        ScienceTopic::Astronomy,
        ScienceTopic::Biology,
        ScienceTopic::Acoustics,
    ];

    /// The stable string form used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScienceTopic::Mathematics => "mathematics",
            ScienceTopic::Physics => "physics",
            ScienceTopic::Chemistry => "chemistry",
            ScienceTopic::Geology => "geology",
            ScienceTopic::Hydraulics => "hydraulics",
            ScienceTopic::Optics => "optics",
            ScienceTopic::Materials => "materials",
            ScienceTopic::Architecture => "architecture",
            ScienceTopic::Engineering => "engineering",
            ScienceTopic::Astronomy => "astronomy",
            ScienceTopic::Biology => "biology",
            ScienceTopic::Acoustics => "acoustics",
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            ScienceTopic::Mathematics => "Mathematics",
            ScienceTopic::Physics => "Physics",
            ScienceTopic::Chemistry => "Chemistry",
            ScienceTopic::Geology => "Geology",
            ScienceTopic::Hydraulics => "Hydraulics",
            ScienceTopic::Optics => "Optics",
            ScienceTopic::Materials => "Materials Science",
            ScienceTopic::Architecture => "Architecture",
            ScienceTopic::Engineering => "Engineering",
            ScienceTopic::Astronomy => "Astronomy",
            ScienceTopic::Biology => "Biology",
            ScienceTopic::Acoustics => "Acoustics",
        }
    }
}

impl std::fmt::Display for ScienceTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no member of a closed label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl std::fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown label: {}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for ScienceTopic {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScienceTopic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Completable phases of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildingPhase {
    Lesson,
    Quiz,
    Sketch,
    Build,
}

impl BuildingPhase {
    pub const ALL: [BuildingPhase; 4] = [
        BuildingPhase::Lesson,
        BuildingPhase::Quiz,
        BuildingPhase::Sketch,
        BuildingPhase::Build,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingPhase::Lesson => "lesson",
            BuildingPhase::Quiz => "quiz",
            BuildingPhase::Sketch => "sketch",
            BuildingPhase::Build => "build",
        }
    }
}

impl std::fmt::Display for BuildingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingPhase {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingPhase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}
