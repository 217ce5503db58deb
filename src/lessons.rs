use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::StudyDeskError;

/// One entry of the append-only lesson log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub day: String,
    pub subject: String,
}

impl Lesson {
    pub fn create(conn: &Connection, day: &str, subject: &str) -> Result<Lesson, StudyDeskError> {
        conn.execute(
            "INSERT INTO lessons (day, subject) VALUES (?1, ?2)",
            params![day, subject],
        )?;
        Ok(Lesson {
            id: conn.last_insert_rowid(),
            day: day.to_string(),
            subject: subject.to_string(),
        })
    }

    /// Lessons grouped for display: ordered by day label, then storage order
    /// within a day.
    pub fn get_all(conn: &Connection) -> Result<Vec<Lesson>, StudyDeskError> {
        let mut stmt = conn.prepare("SELECT id, day, subject FROM lessons ORDER BY day, id")?;
        let lessons = stmt
            .query_map([], |row| {
                Ok(Lesson {
                    id: row.get(0)?,
                    day: row.get(1)?,
                    subject: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lessons)
    }
}
