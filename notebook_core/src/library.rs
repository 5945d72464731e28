//! Content library - resolves lessons from the persistent store, falling back
//! to the static catalog.
//!
//! Callers never learn which tier answered: a missing record, a store error
//! or a record that fails to decode all degrade to the compiled-in lesson.
//! Only a building unknown to both tiers produces `None`.

use lesson_content::{Building, BuildingId, Lesson, StaticCatalog};
use tracing::{debug, info, warn};

use crate::config::NotebookConfig;
use crate::error::NotebookError;
use crate::notebook::{
    entries_from_lesson, entries_from_station_lesson, entries_from_vocabulary, BuildingNotebook,
    NotebookEntry, StationLesson,
};
use crate::progress::{PersistedProgressRecord, ProgressValue};
use crate::store::{LessonStore, PersistedLessonRecord, SqliteStore};

/// Which tier a lesson was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonSource {
    Persisted,
    Static,
}

/// Result of [`ContentLibrary::seed_if_needed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held at least one record per authored building.
    AlreadySeeded { existing: usize },
    Seeded { inserted: usize },
}

/// Two-tier lesson resolver: persisted store first, static catalog second.
pub struct ContentLibrary<S> {
    store: S,
    catalog: StaticCatalog,
    dedupe_entries: bool,
}

impl<S: LessonStore> ContentLibrary<S> {
    pub fn new(store: S, catalog: StaticCatalog) -> Self {
        Self {
            store,
            catalog,
            dedupe_entries: true,
        }
    }

    /// Whether recorded notes skip entries already in the notebook.
    pub fn with_dedupe_entries(mut self, dedupe: bool) -> Self {
        self.dedupe_entries = dedupe;
        self
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Populate the store from the static catalog on first run.
    ///
    /// Does nothing once the store holds a record for every authored
    /// building, so it is safe to call on every startup. Buildings that
    /// already have a record are left untouched.
    pub fn seed_if_needed(&mut self) -> Result<SeedOutcome, NotebookError> {
        let expected = self.catalog.authored_count();
        let existing = self.store.count()?;
        if existing >= expected {
            debug!(existing, expected, "Lesson store already seeded");
            return Ok(SeedOutcome::AlreadySeeded { existing });
        }

        let mut inserted = 0;
        for lesson in self.catalog.lessons() {
            if self.store.fetch(&lesson.building_name)?.is_some() {
                continue;
            }
            self.store.insert(PersistedLessonRecord::from_lesson(lesson)?)?;
            inserted += 1;
        }
        self.store.commit()?;

        info!(inserted, "Seeded lesson store from static catalog");
        Ok(SeedOutcome::Seeded { inserted })
    }

    /// The lesson for a building, or `None` if neither tier knows it.
    pub fn fetch_lesson(&self, building_name: &str) -> Option<Lesson> {
        self.resolve_lesson(building_name).map(|(lesson, _)| lesson)
    }

    /// Like [`fetch_lesson`](Self::fetch_lesson), also reporting the tier.
    pub fn resolve_lesson(&self, building_name: &str) -> Option<(Lesson, LessonSource)> {
        self.fetch_persisted(building_name)
            .map(|lesson| (lesson, LessonSource::Persisted))
            .or_else(|| {
                self.catalog
                    .lesson(building_name)
                    .cloned()
                    .map(|lesson| (lesson, LessonSource::Static))
            })
    }

    fn fetch_persisted(&self, building_name: &str) -> Option<Lesson> {
        let record = match self.store.fetch(building_name) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                warn!(building = building_name, error = %e, "Lesson store lookup failed, using static content");
                return None;
            }
        };

        match record.to_lesson() {
            Ok(lesson) => Some(lesson),
            Err(e) => {
                warn!(building = building_name, error = %e, "Stored lesson is unreadable, using static content");
                None
            }
        }
    }

    /// Every notebook entry a building's lesson and glossary yield.
    pub fn extract_entries(&self, building: &Building) -> Option<Vec<NotebookEntry>> {
        let lesson = self.fetch_lesson(&building.name)?;
        let mut entries = entries_from_lesson(&lesson, building.id);
        entries.extend(entries_from_vocabulary(
            self.catalog.vocabulary(&building.name),
            building.id,
        ));
        Some(entries)
    }
}

impl ContentLibrary<SqliteStore> {
    /// Open the store named by `config` with the bundled catalog, seeding it
    /// if configured to.
    ///
    /// A failed seed is logged and the library is returned anyway; lookups
    /// then fall back to the catalog per building.
    pub fn open(config: &NotebookConfig) -> Result<Self, NotebookError> {
        let store = SqliteStore::open_with_config(&config.store)?;
        let catalog = StaticCatalog::load()?;
        let mut library = Self::new(store, catalog).with_dedupe_entries(config.notebook.dedupe_entries);

        if config.store.seed_on_open {
            if let Err(e) = library.seed_if_needed() {
                warn!(error = %e, "Seeding lesson store failed, serving static content");
            }
        }
        Ok(library)
    }

    /// Load a building's stored notebook by id.
    pub fn notebook(&self, building_id: BuildingId) -> Result<Option<BuildingNotebook>, NotebookError> {
        match self.catalog.building_by_id(building_id) {
            Some(building) => self.store.load_notebook(building).map(Some),
            None => Ok(None),
        }
    }

    /// Distill a building's lesson into its notebook and persist the new entries.
    ///
    /// Returns the number of entries added, or `None` for an unknown building.
    pub fn record_lesson_notes(&self, building_name: &str) -> Result<Option<usize>, NotebookError> {
        let Some(building) = self.catalog.building(building_name) else {
            return Ok(None);
        };
        let Some(entries) = self.extract_entries(building) else {
            return Ok(None);
        };

        let added = self.append_to_notebook(building, entries)?;
        info!(building = building_name, added, "Recorded lesson notes");
        Ok(Some(added))
    }

    /// Cross-reference a station lesson into every matching building's notebook.
    ///
    /// Returns the number of entries added across all buildings.
    pub fn record_station_lesson(&self, station: &StationLesson) -> Result<usize, NotebookError> {
        let mut added = 0;
        for entry in entries_from_station_lesson(station, self.catalog.buildings()) {
            let Some(building) = self.catalog.building_by_id(entry.building_id) else {
                continue;
            };
            added += self.append_to_notebook(building, vec![entry])?;
        }
        debug!(station = %station.label, added, "Recorded station lesson");
        Ok(added)
    }

    /// Add a note written by the player.
    pub fn add_user_note(
        &self,
        building_id: BuildingId,
        title: &str,
        body: &str,
    ) -> Result<NotebookEntry, NotebookError> {
        let entry = NotebookEntry::user_note(building_id, title, body);
        self.store.append_entries(std::slice::from_ref(&entry))?;
        Ok(entry)
    }

    fn append_to_notebook(
        &self,
        building: &Building,
        entries: Vec<NotebookEntry>,
    ) -> Result<usize, NotebookError> {
        if !self.dedupe_entries {
            return self.store.append_entries(&entries);
        }

        let mut notebook = self.store.load_notebook(building)?;
        let added: Vec<NotebookEntry> = notebook.merge_entries(entries).into_iter().cloned().collect();
        self.store.append_entries(&added)
    }

    /// Current progress for a building; a fresh value if nothing is stored.
    pub fn load_progress(&self, building_id: BuildingId) -> Result<ProgressValue, NotebookError> {
        Ok(self
            .store
            .load_progress(building_id)?
            .map(|record| record.to_progress_value())
            .unwrap_or_default())
    }

    /// Write a progress value, preserving fields owned by other systems.
    pub fn save_progress(&self, building_id: BuildingId, value: &ProgressValue) -> Result<(), NotebookError> {
        let mut record = self
            .store
            .load_progress(building_id)?
            .unwrap_or_else(|| PersistedProgressRecord::new(building_id));
        record.apply_progress(value);
        self.store.save_progress(&mut record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::EntryType;
    use crate::store::MemoryStore;
    use lesson_content::{BuildingPhase, FunFactContent, LessonSection, ReadingContent, ScienceTopic};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn memory_library() -> ContentLibrary<MemoryStore> {
        init_tracing();
        ContentLibrary::new(MemoryStore::new(), StaticCatalog::load().unwrap())
    }

    fn sqlite_library() -> ContentLibrary<SqliteStore> {
        init_tracing();
        ContentLibrary::open(&NotebookConfig::default()).unwrap()
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut library = memory_library();

        assert_eq!(library.seed_if_needed().unwrap(), SeedOutcome::Seeded { inserted: 17 });
        assert_eq!(
            library.seed_if_needed().unwrap(),
            SeedOutcome::AlreadySeeded { existing: 17 }
        );
        assert_eq!(library.store().count().unwrap(), 17);
    }

    #[test]
    fn test_seed_visible_to_fetch() {
        let mut library = memory_library();
        library.seed_if_needed().unwrap();

        let (lesson, source) = library.resolve_lesson("Aqueduct").unwrap();
        assert_eq!(source, LessonSource::Persisted);
        assert_eq!(&lesson, library.catalog().lesson("Aqueduct").unwrap());
    }

    #[test]
    fn test_partial_store_seeds_only_missing() {
        let catalog = StaticCatalog::load().unwrap();
        let custom = Lesson::new("Forum", "A Custom Forum Lesson")
            .with_section(LessonSection::Reading(ReadingContent::new("Edited")));
        let store = MemoryStore::with_records([PersistedLessonRecord::from_lesson(&custom).unwrap()]);
        let mut library = ContentLibrary::new(store, catalog);

        assert_eq!(library.seed_if_needed().unwrap(), SeedOutcome::Seeded { inserted: 16 });
        assert_eq!(library.fetch_lesson("Forum").unwrap(), custom);
    }

    #[test]
    fn test_unseeded_store_falls_back_to_static() {
        let library = memory_library();
        let (lesson, source) = library.resolve_lesson("Pantheon").unwrap();
        assert_eq!(source, LessonSource::Static);
        assert_eq!(lesson.building_name, "Pantheon");
    }

    #[test]
    fn test_deleted_record_falls_back_to_static() {
        let mut library = memory_library();
        library.seed_if_needed().unwrap();
        library.store_mut().remove("Harbor");

        let (lesson, source) = library.resolve_lesson("Harbor").unwrap();
        assert_eq!(source, LessonSource::Static);
        assert_eq!(&lesson, library.catalog().lesson("Harbor").unwrap());
    }

    #[test]
    fn test_corrupt_record_falls_back_to_static() {
        let catalog = StaticCatalog::load().unwrap();
        let mut record = PersistedLessonRecord::from_lesson(catalog.lesson("Odeon").unwrap()).unwrap();
        record.sections = br#"[{"type":"hologram","data":{}}]"#.to_vec();
        let library = ContentLibrary::new(MemoryStore::with_records([record]), catalog);

        let (lesson, source) = library.resolve_lesson("Odeon").unwrap();
        assert_eq!(source, LessonSource::Static);
        assert_eq!(&lesson, library.catalog().lesson("Odeon").unwrap());
    }

    #[test]
    fn test_unknown_building_is_none() {
        let mut library = memory_library();
        library.seed_if_needed().unwrap();
        assert!(library.fetch_lesson("Atlantis").is_none());
    }

    #[test]
    fn test_persisted_only_building_is_served() {
        let lesson = Lesson::new("Watermill", "Wheels and Water");
        let store = MemoryStore::with_records([PersistedLessonRecord::from_lesson(&lesson).unwrap()]);
        let library = ContentLibrary::new(store, StaticCatalog::load().unwrap());

        let fetched = library.fetch_lesson("Watermill").unwrap();
        assert_eq!(fetched, lesson);
        assert_eq!(fetched.section_count(), 0);
    }

    #[test]
    fn test_sqlite_open_seeds() {
        let library = sqlite_library();
        assert_eq!(library.store().count().unwrap(), 17);
        assert_eq!(
            library.resolve_lesson("Colosseum").map(|(_, source)| source),
            Some(LessonSource::Persisted)
        );
    }

    #[test]
    fn test_sqlite_open_without_seeding() {
        let mut config = NotebookConfig::default();
        config.store.seed_on_open = false;
        let library = ContentLibrary::open(&config).unwrap();

        assert_eq!(library.store().count().unwrap(), 0);
        assert_eq!(
            library.resolve_lesson("Colosseum").map(|(_, source)| source),
            Some(LessonSource::Static)
        );
    }

    #[test]
    fn test_sqlite_seed_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NotebookConfig::default();
        config.store.path = Some(dir.path().join("academy.db"));

        drop(ContentLibrary::open(&config).unwrap());
        let mut library = ContentLibrary::open(&config).unwrap();

        assert_eq!(library.store().count().unwrap(), 17);
        assert_eq!(
            library.seed_if_needed().unwrap(),
            SeedOutcome::AlreadySeeded { existing: 17 }
        );
    }

    #[test]
    fn test_failed_seed_still_serves_static() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("academy.db");
        SqliteStore::open(&path)
            .unwrap()
            .with_conn(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_lessons BEFORE INSERT ON lessons
                     BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
                )?;
                Ok(())
            })
            .unwrap();

        let mut config = NotebookConfig::default();
        config.store.path = Some(path);
        let library = ContentLibrary::open(&config).unwrap();

        assert_eq!(library.store().count().unwrap(), 0);
        let (lesson, source) = library.resolve_lesson("Aqueduct").unwrap();
        assert_eq!(source, LessonSource::Static);
        assert_eq!(&lesson, library.catalog().lesson("Aqueduct").unwrap());
    }

    #[test]
    fn test_repeated_sections_each_get_an_entry() {
        let mut config = NotebookConfig::default();
        config.store.seed_on_open = false;
        let mut library = ContentLibrary::open(&config).unwrap();

        let lesson = Lesson::new("Forum", "Echoes")
            .with_section(LessonSection::FunFact(FunFactContent { text: "Same".into() }))
            .with_section(LessonSection::FunFact(FunFactContent { text: "Same".into() }));
        let store = library.store_mut();
        store.insert(PersistedLessonRecord::from_lesson(&lesson).unwrap()).unwrap();
        store.commit().unwrap();

        assert_eq!(library.record_lesson_notes("Forum").unwrap(), Some(2));
        assert_eq!(library.record_lesson_notes("Forum").unwrap(), Some(0));

        let forum = library.catalog().building("Forum").unwrap().id;
        let notebook = library.notebook(forum).unwrap().unwrap();
        assert_eq!(notebook.entries_of(EntryType::FunFact).len(), 2);
    }

    #[test]
    fn test_sqlite_corrupt_record_falls_back() {
        let library = sqlite_library();
        library
            .store()
            .with_conn(|conn| {
                conn.execute(
                    "UPDATE lessons SET sections = ?1 WHERE building_name = 'Bakery'",
                    [b"not json".to_vec()],
                )?;
                Ok(())
            })
            .unwrap();

        let (lesson, source) = library.resolve_lesson("Bakery").unwrap();
        assert_eq!(source, LessonSource::Static);
        assert_eq!(&lesson, library.catalog().lesson("Bakery").unwrap());
    }

    #[test]
    fn test_record_lesson_notes_dedupes() {
        let library = sqlite_library();

        let first = library.record_lesson_notes("Pantheon").unwrap().unwrap();
        // Two readings, a question and a fill-in-blanks, plus two glossary terms.
        assert_eq!(first, 6);
        assert_eq!(library.record_lesson_notes("Pantheon").unwrap(), Some(0));

        let building = library.catalog().building("Pantheon").unwrap().clone();
        let notebook = library.notebook(building.id).unwrap().unwrap();
        assert_eq!(notebook.len(), 6);
        assert_eq!(notebook.entries_of(EntryType::QuizResult).len(), 1);
        assert_eq!(notebook.entries_of(EntryType::Vocabulary).len(), 3);
    }

    #[test]
    fn test_record_lesson_notes_without_dedupe() {
        let mut config = NotebookConfig::default();
        config.notebook.dedupe_entries = false;
        let library = ContentLibrary::open(&config).unwrap();

        library.record_lesson_notes("Bakery").unwrap();
        library.record_lesson_notes("Bakery").unwrap();

        let bakery = library.catalog().building("Bakery").unwrap().id;
        assert_eq!(library.notebook(bakery).unwrap().unwrap().len(), 6);
    }

    #[test]
    fn test_record_lesson_notes_unknown_building() {
        let library = sqlite_library();
        assert_eq!(library.record_lesson_notes("Atlantis").unwrap(), None);
    }

    #[test]
    fn test_record_station_lesson() {
        let library = sqlite_library();
        let station = StationLesson {
            label: "Forest Station".into(),
            title: "Why Oak?".into(),
            body: "Oak is dense and rich in tannins.".into(),
            tags: vec![ScienceTopic::Acoustics],
        };

        // Colosseum and Odeon teach acoustics.
        assert_eq!(library.record_station_lesson(&station).unwrap(), 2);
        assert_eq!(library.record_station_lesson(&station).unwrap(), 0);

        let odeon = library.catalog().building("Odeon").unwrap().id;
        let notes = library.notebook(odeon).unwrap().unwrap();
        assert_eq!(notes.entries_of(EntryType::EnvironmentNote).len(), 1);
        assert_eq!(notes.entries()[0].title, "Forest Station: Why Oak?");
    }

    #[test]
    fn test_user_note_and_annotation() {
        let library = sqlite_library();
        let forum = library.catalog().building("Forum").unwrap().id;

        let note = library.add_user_note(forum, "Idea", "Measure the basilica").unwrap();
        library.store().annotate_entry(note.id, Some("3:2 again")).unwrap();

        let notebook = library.notebook(forum).unwrap().unwrap();
        assert_eq!(notebook.get(note.id).unwrap().user_annotation.as_deref(), Some("3:2 again"));
        assert!(library.notebook(BuildingId(999)).unwrap().is_none());
    }

    #[test]
    fn test_progress_through_library() {
        let library = sqlite_library();
        let aqueduct = BuildingId(1);
        assert_eq!(library.load_progress(aqueduct).unwrap(), ProgressValue::default());

        let mut value = ProgressValue::new();
        value.earn_topic(ScienceTopic::Hydraulics);
        value.complete_phase(BuildingPhase::Quiz);
        library.save_progress(aqueduct, &value).unwrap();

        assert_eq!(library.load_progress(aqueduct).unwrap(), value);
    }

    #[test]
    fn test_save_progress_keeps_reward_points() {
        let library = sqlite_library();
        let harbor = BuildingId(6);

        let mut record = PersistedProgressRecord::new(harbor);
        record.reward_points = 75;
        library.store().save_progress(&mut record).unwrap();

        let mut value = ProgressValue::new();
        value.current_section = 4;
        library.save_progress(harbor, &value).unwrap();

        let stored = library.store().load_progress(harbor).unwrap().unwrap();
        assert_eq!(stored.reward_points, 75);
        assert_eq!(stored.current_section, 4);
    }
}
