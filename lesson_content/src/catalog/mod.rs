//! Static authoring catalog compiled into the crate.
//!
//! The catalog is the default source of every building, lesson, vocabulary
//! list and sketching challenge. All lookups are by exact building name and
//! return `None` for unknown buildings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::buildings::{Building, BuildingId, ScienceTopic};
use crate::error::ContentError;
use crate::lesson::Lesson;
use crate::sketching::SketchChallenge;

const CATALOG_SOURCE: &str = include_str!("../../data/catalog.toml");

/// A glossary term taught by a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyTerm {
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub topic: Option<ScienceTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VocabularyList {
    building_name: String,
    #[serde(default)]
    terms: Vec<VocabularyTerm>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    buildings: Vec<Building>,
    #[serde(default)]
    lessons: Vec<Lesson>,
    #[serde(default)]
    vocabulary: Vec<VocabularyList>,
    #[serde(default)]
    sketches: Vec<SketchChallenge>,
}

/// The compiled-in authoring data.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    buildings: Vec<Building>,
    lessons: HashMap<String, Lesson>,
    vocabulary: HashMap<String, Vec<VocabularyTerm>>,
    sketches: HashMap<String, SketchChallenge>,
}

impl StaticCatalog {
    /// Load the catalog bundled with this crate.
    pub fn load() -> Result<Self, ContentError> {
        Self::from_toml_str(CATALOG_SOURCE)
    }

    /// Parse and validate a catalog from TOML.
    ///
    /// Every lesson, vocabulary list and sketch must name a declared building,
    /// and every lesson must pass section validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self {
            buildings: file.buildings,
            lessons: HashMap::new(),
            vocabulary: HashMap::new(),
            sketches: HashMap::new(),
        };

        for lesson in file.lessons {
            catalog.require_building(&lesson.building_name)?;
            lesson.validate()?;
            catalog.lessons.insert(lesson.building_name.clone(), lesson);
        }
        for list in file.vocabulary {
            catalog.require_building(&list.building_name)?;
            catalog.vocabulary.insert(list.building_name, list.terms);
        }
        for sketch in file.sketches {
            catalog.require_building(&sketch.building_name)?;
            catalog.sketches.insert(sketch.building_name.clone(), sketch);
        }

        Ok(catalog)
    }

    fn require_building(&self, name: &str) -> Result<(), ContentError> {
        match self.building(name) {
            Some(_) => Ok(()),
            None => Err(ContentError::UnknownBuilding(name.to_string())),
        }
    }

    /// All buildings in id order of declaration.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.name == name)
    }

    pub fn building_by_id(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn lesson(&self, building_name: &str) -> Option<&Lesson> {
        self.lessons.get(building_name)
    }

    /// Lessons in building declaration order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.buildings.iter().filter_map(|b| self.lessons.get(&b.name))
    }

    /// Number of buildings with an authored lesson.
    pub fn authored_count(&self) -> usize {
        self.lessons.len()
    }

    /// Vocabulary for a building; empty for unknown buildings.
    pub fn vocabulary(&self, building_name: &str) -> &[VocabularyTerm] {
        self.vocabulary
            .get(building_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn sketch_challenge(&self, building_name: &str) -> Option<&SketchChallenge> {
        self.sketches.get(building_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::SectionKind;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = StaticCatalog::load().unwrap();

        assert_eq!(catalog.buildings().len(), 17);
        assert_eq!(catalog.authored_count(), 17);
        for building in catalog.buildings() {
            assert!(catalog.lesson(&building.name).is_some(), "{} has no lesson", building.name);
            assert!(!building.topics.is_empty());
        }
    }

    #[test]
    fn test_bundled_ids_and_names_unique() {
        let catalog = StaticCatalog::load().unwrap();
        let ids: HashSet<_> = catalog.buildings().iter().map(|b| b.id).collect();
        let names: HashSet<_> = catalog.buildings().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(ids.len(), 17);
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn test_bundled_catalog_covers_every_section_kind() {
        let catalog = StaticCatalog::load().unwrap();
        for kind in SectionKind::ALL {
            assert!(
                catalog.lessons().any(|l| l.sections_of(kind).next().is_some()),
                "no lesson uses {kind}"
            );
        }
    }

    #[test]
    fn test_lookup_by_exact_name() {
        let catalog = StaticCatalog::load().unwrap();
        assert!(catalog.lesson("Aqueduct").is_some());
        assert!(catalog.lesson("aqueduct").is_none());
        assert!(catalog.lesson("Atlantis").is_none());
        assert!(catalog.vocabulary("Atlantis").is_empty());
        assert!(catalog.sketch_challenge("Atlantis").is_none());
    }

    #[test]
    fn test_building_by_id() {
        let catalog = StaticCatalog::load().unwrap();
        let aqueduct = catalog.building("Aqueduct").unwrap();
        assert_eq!(catalog.building_by_id(aqueduct.id), Some(aqueduct));
    }

    #[test]
    fn test_unknown_building_rejected() {
        let source = r#"
            [[buildings]]
            id = 1
            name = "Aqueduct"

            [[lessons]]
            buildingName = "Atlantis"
            title = "Sunk"
        "#;
        assert!(matches!(
            StaticCatalog::from_toml_str(source),
            Err(ContentError::UnknownBuilding(name)) if name == "Atlantis"
        ));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            StaticCatalog::from_toml_str("buildings = 3"),
            Err(ContentError::Catalog(_))
        ));
    }
}
