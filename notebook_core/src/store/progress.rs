//! Progress record persistence

use chrono::Utc;
use lesson_content::BuildingId;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::NotebookError;
use crate::progress::PersistedProgressRecord;

struct ProgressRow {
    building_id: u32,
    earned_topics: String,
    completed_phases: String,
    sketch_completed: bool,
    quiz_passed: bool,
    lesson_read: bool,
    current_section: i64,
    reward_points: u32,
    updated_at: chrono::DateTime<Utc>,
}

impl ProgressRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            building_id: row.get("building_id")?,
            earned_topics: row.get("earned_topics")?,
            completed_phases: row.get("completed_phases")?,
            sketch_completed: row.get("sketch_completed")?,
            quiz_passed: row.get("quiz_passed")?,
            lesson_read: row.get("lesson_read")?,
            current_section: row.get("current_section")?,
            reward_points: row.get("reward_points")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_record(self) -> Result<PersistedProgressRecord, NotebookError> {
        let current_section = usize::try_from(self.current_section).map_err(|_| {
            NotebookError::CorruptRecord(format!(
                "progress {}: current section {}",
                self.building_id, self.current_section
            ))
        })?;
        Ok(PersistedProgressRecord {
            building_id: BuildingId(self.building_id),
            earned_topics: serde_json::from_str(&self.earned_topics)?,
            completed_phases: serde_json::from_str(&self.completed_phases)?,
            sketch_completed: self.sketch_completed,
            quiz_passed: self.quiz_passed,
            lesson_read: self.lesson_read,
            current_section,
            reward_points: self.reward_points,
            updated_at: self.updated_at,
        })
    }
}

pub fn get_progress(
    conn: &Connection,
    building_id: BuildingId,
) -> Result<Option<PersistedProgressRecord>, NotebookError> {
    let row = conn
        .query_row(
            "SELECT * FROM progress WHERE building_id = ?1",
            params![building_id.0],
            ProgressRow::from_row,
        )
        .optional()?;
    row.map(ProgressRow::into_record).transpose()
}

/// Insert or replace the record for its building, stamping `updated_at`.
pub fn upsert_progress(conn: &Connection, record: &mut PersistedProgressRecord) -> Result<(), NotebookError> {
    record.updated_at = Utc::now();
    conn.execute(
        "INSERT INTO progress
         (building_id, earned_topics, completed_phases, sketch_completed, quiz_passed,
          lesson_read, current_section, reward_points, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(building_id) DO UPDATE SET
            earned_topics = excluded.earned_topics,
            completed_phases = excluded.completed_phases,
            sketch_completed = excluded.sketch_completed,
            quiz_passed = excluded.quiz_passed,
            lesson_read = excluded.lesson_read,
            current_section = excluded.current_section,
            reward_points = excluded.reward_points,
            updated_at = excluded.updated_at",
        params![
            record.building_id.0,
            serde_json::to_string(&record.earned_topics)?,
            serde_json::to_string(&record.completed_phases)?,
            record.sketch_completed,
            record.quiz_passed,
            record.lesson_read,
            record.current_section as i64,
            record.reward_points,
            record.updated_at,
        ],
    )?;
    Ok(())
}
