//! SQLite-backed store for lessons, notebooks and progress.

use lesson_content::{Building, BuildingId};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

use super::{entries, lessons, progress, schema, LessonStore, PersistedLessonRecord};
use crate::config::StoreConfig;
use crate::error::NotebookError;
use crate::notebook::{BuildingNotebook, EntryId, NotebookEntry};
use crate::progress::PersistedProgressRecord;

/// SQLite database holding every persisted record.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    /// Lesson records staged by `insert`, written on `commit`.
    pending: Vec<PersistedLessonRecord>,
}

impl SqliteStore {
    /// Open or create a database file.
    pub fn open(path: &Path) -> Result<Self, NotebookError> {
        info!("Opening SQLite database at {:?}", path);
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, NotebookError> {
        debug!("Opening in-memory SQLite database");
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Open the database described by `config`.
    pub fn open_with_config(config: &StoreConfig) -> Result<Self, NotebookError> {
        match &config.path {
            Some(path) => Self::open(path),
            None => Self::open_in_memory(),
        }
    }

    fn with_connection(conn: Connection) -> Result<Self, NotebookError> {
        schema::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            pending: Vec::new(),
        })
    }

    /// Run `f` with the connection locked.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, NotebookError>
    where
        F: FnOnce(&Connection) -> Result<T, NotebookError>,
    {
        let conn = self.conn.lock().map_err(|_| NotebookError::LockPoisoned)?;
        f(&conn)
    }

    /// Run `f` with exclusive access, for transactions.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T, NotebookError>
    where
        F: FnOnce(&mut Connection) -> Result<T, NotebookError>,
    {
        let mut conn = self.conn.lock().map_err(|_| NotebookError::LockPoisoned)?;
        f(&mut conn)
    }

    /// Delete a building's lesson record. Returns false if none was stored.
    pub fn remove_lesson(&self, building_name: &str) -> Result<bool, NotebookError> {
        self.with_conn(|conn| lessons::delete_lesson(conn, building_name))
    }

    /// Persist notebook entries. Entries already stored (by id) are skipped.
    pub fn append_entries(&self, entries: &[NotebookEntry]) -> Result<usize, NotebookError> {
        self.with_conn_mut(|conn| entries::insert_entries(conn, entries))
    }

    pub fn load_entries(&self, building_id: BuildingId) -> Result<Vec<NotebookEntry>, NotebookError> {
        self.with_conn(|conn| entries::get_entries(conn, building_id))
    }

    /// Load the stored notebook for a building.
    pub fn load_notebook(&self, building: &Building) -> Result<BuildingNotebook, NotebookError> {
        let entries = self.load_entries(building.id)?;
        if entries.is_empty() {
            return Ok(BuildingNotebook::new(building));
        }
        Ok(BuildingNotebook::from_entries(building.id, building.name.clone(), entries))
    }

    /// Set or clear the player's annotation on a stored entry.
    pub fn annotate_entry(&self, id: EntryId, annotation: Option<&str>) -> Result<(), NotebookError> {
        self.with_conn(|conn| entries::set_annotation(conn, id, annotation))
    }

    pub fn load_progress(&self, building_id: BuildingId) -> Result<Option<PersistedProgressRecord>, NotebookError> {
        self.with_conn(|conn| progress::get_progress(conn, building_id))
    }

    /// Insert or replace a progress record; `updated_at` is set to now.
    pub fn save_progress(&self, record: &mut PersistedProgressRecord) -> Result<(), NotebookError> {
        self.with_conn(|conn| progress::upsert_progress(conn, record))
    }
}

impl LessonStore for SqliteStore {
    fn count(&self) -> Result<usize, NotebookError> {
        self.with_conn(lessons::count_lessons)
    }

    fn insert(&mut self, record: PersistedLessonRecord) -> Result<(), NotebookError> {
        let staged = self
            .pending
            .iter()
            .any(|r| r.building_name == record.building_name);
        if staged || self.fetch(&record.building_name)?.is_some() {
            return Err(NotebookError::DuplicateLesson(record.building_name));
        }
        self.pending.push(record);
        Ok(())
    }

    fn fetch(&self, building_name: &str) -> Result<Option<PersistedLessonRecord>, NotebookError> {
        self.with_conn(|conn| lessons::get_lesson(conn, building_name))
    }

    fn fetch_first(&self, limit: usize) -> Result<Vec<PersistedLessonRecord>, NotebookError> {
        self.with_conn(|conn| lessons::list_lessons(conn, limit))
    }

    /// Write staged records in one transaction. On failure nothing is
    /// written and the staged records are discarded.
    fn commit(&mut self) -> Result<(), NotebookError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        self.with_conn_mut(|conn| lessons::insert_lessons(conn, &pending))
    }
}
