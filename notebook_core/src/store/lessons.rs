//! Lesson record CRUD operations

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::PersistedLessonRecord;
use crate::error::NotebookError;

fn record_from_row(row: &Row) -> Result<PersistedLessonRecord, rusqlite::Error> {
    Ok(PersistedLessonRecord {
        building_name: row.get("building_name")?,
        title: row.get("title")?,
        sections: row.get("sections")?,
        last_modified: row.get("last_modified")?,
        version: row.get("version")?,
    })
}

pub fn count_lessons(conn: &Connection) -> Result<usize, NotebookError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM lessons", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn get_lesson(conn: &Connection, building_name: &str) -> Result<Option<PersistedLessonRecord>, NotebookError> {
    let record = conn
        .query_row(
            "SELECT * FROM lessons WHERE building_name = ?1",
            params![building_name],
            record_from_row,
        )
        .optional()?;
    Ok(record)
}

pub fn list_lessons(conn: &Connection, limit: usize) -> Result<Vec<PersistedLessonRecord>, NotebookError> {
    let mut stmt = conn.prepare("SELECT * FROM lessons ORDER BY building_name LIMIT ?1")?;
    let records = stmt
        .query_map(params![limit as i64], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Insert records in a single transaction.
pub fn insert_lessons(conn: &mut Connection, records: &[PersistedLessonRecord]) -> Result<(), NotebookError> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO lessons (building_name, title, sections, last_modified, version)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for record in records {
            stmt.execute(params![
                record.building_name,
                record.title,
                record.sections,
                record.last_modified,
                record.version,
            ])?;
        }
    }
    tx.commit()?;

    debug!(count = records.len(), "Inserted lesson records");
    Ok(())
}

pub fn delete_lesson(conn: &Connection, building_name: &str) -> Result<bool, NotebookError> {
    let deleted = conn.execute("DELETE FROM lessons WHERE building_name = ?1", params![building_name])?;
    Ok(deleted > 0)
}
