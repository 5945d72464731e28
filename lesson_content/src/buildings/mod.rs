//! Building definitions for the Academy.

mod topics;

pub use topics::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identifier for a learnable building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

impl BuildingId {
    /// Create a building ID from its raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BuildingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A learnable building: an immutable identity plus its own topic-tag set.
///
/// Authoring data maps the building `name` to lesson content, so names are
/// treated as exact lookup keys everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    /// Topics this building teaches; used to cross-reference station lessons.
    #[serde(default)]
    pub topics: BTreeSet<ScienceTopic>,
}

impl Building {
    /// Create a new building with no topics.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: BuildingId(id),
            name: name.into(),
            topics: BTreeSet::new(),
        }
    }

    /// Add a topic tag to this building.
    pub fn with_topic(mut self, topic: ScienceTopic) -> Self {
        self.topics.insert(topic);
        self
    }

    /// Add multiple topic tags to this building.
    pub fn with_topics(mut self, topics: impl IntoIterator<Item = ScienceTopic>) -> Self {
        self.topics.extend(topics);
        self
    }

    /// Check if this building teaches a specific topic.
    pub fn teaches(&self, topic: ScienceTopic) -> bool {
        self.topics.contains(&topic)
    }

    /// Topics shared between this building and the given set.
    pub fn shared_topics<'a>(
        &'a self,
        other: &'a BTreeSet<ScienceTopic>,
    ) -> impl Iterator<Item = &'a ScienceTopic> {
        self.topics.intersection(other)
    }
}
