//! Notebook entry persistence

use lesson_content::{BuildingId, ScienceTopic};
use rusqlite::{params, Connection, Row};
use tracing::debug;
use uuid::Uuid;

use crate::error::NotebookError;
use crate::notebook::{EntryId, EntryType, NotebookEntry};

/// Raw row, before the text columns are parsed back into closed sets.
struct EntryRow {
    id: String,
    building_id: u32,
    entry_type: String,
    topic: Option<String>,
    title: String,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
    user_annotation: Option<String>,
}

impl EntryRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            building_id: row.get("building_id")?,
            entry_type: row.get("entry_type")?,
            topic: row.get("topic")?,
            title: row.get("title")?,
            body: row.get("body")?,
            created_at: row.get("created_at")?,
            user_annotation: row.get("user_annotation")?,
        })
    }

    fn into_entry(self) -> Result<NotebookEntry, NotebookError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| NotebookError::CorruptRecord(format!("entry id {}: {}", self.id, e)))?;
        let entry_type: EntryType = self
            .entry_type
            .parse()
            .map_err(|e| NotebookError::CorruptRecord(format!("entry {}: {}", self.id, e)))?;
        // Topics from a newer build are dropped rather than failing the load.
        let topic = self.topic.and_then(|t| t.parse::<ScienceTopic>().ok());

        Ok(NotebookEntry {
            id: EntryId(id),
            building_id: BuildingId(self.building_id),
            entry_type,
            topic,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
            user_annotation: self.user_annotation,
        })
    }
}

/// Insert entries, skipping any whose id is already stored.
///
/// Returns the number of entries written.
pub fn insert_entries(conn: &mut Connection, entries: &[NotebookEntry]) -> Result<usize, NotebookError> {
    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO notebook_entries
             (id, building_id, entry_type, topic, title, body, created_at, user_annotation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for entry in entries {
            inserted += stmt.execute(params![
                entry.id.to_string(),
                entry.building_id.0,
                entry.entry_type.as_str(),
                entry.topic.map(|t| t.as_str()),
                entry.title,
                entry.body,
                entry.created_at,
                entry.user_annotation,
            ])?;
        }
    }
    tx.commit()?;

    debug!(inserted, "Appended notebook entries");
    Ok(inserted)
}

/// Entries for a building in insertion order.
pub fn get_entries(conn: &Connection, building_id: BuildingId) -> Result<Vec<NotebookEntry>, NotebookError> {
    let mut stmt = conn.prepare("SELECT * FROM notebook_entries WHERE building_id = ?1 ORDER BY rowid")?;
    let rows = stmt
        .query_map(params![building_id.0], EntryRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(EntryRow::into_entry).collect()
}

pub fn set_annotation(conn: &Connection, id: EntryId, annotation: Option<&str>) -> Result<(), NotebookError> {
    let updated = conn.execute(
        "UPDATE notebook_entries SET user_annotation = ?1 WHERE id = ?2",
        params![annotation, id.to_string()],
    )?;
    if updated == 0 {
        return Err(NotebookError::EntryNotFound(id));
    }
    Ok(())
}
