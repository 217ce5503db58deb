use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::StudyDeskError;

/// Exams have no stored time; notifications synthesize this one.
pub const DEFAULT_EXAM_TIME: &str = "08:00";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub subject: String,
    pub date: String,
    pub details: String,
}

impl Exam {
    pub fn create(
        conn: &Connection,
        subject: &str,
        date: &str,
        details: &str,
    ) -> Result<Exam, StudyDeskError> {
        conn.execute(
            "INSERT INTO exams (subject, date, details) VALUES (?1, ?2, ?3)",
            params![subject, date, details],
        )?;
        Ok(Exam {
            id: conn.last_insert_rowid(),
            subject: subject.to_string(),
            date: date.to_string(),
            details: details.to_string(),
        })
    }

    pub fn get_all(conn: &Connection) -> Result<Vec<Exam>, StudyDeskError> {
        Self::query(conn, "SELECT id, subject, date, details FROM exams ORDER BY id", [])
    }

    pub fn get_upcoming(conn: &Connection, threshold: &str) -> Result<Vec<Exam>, StudyDeskError> {
        Self::query(
            conn,
            "SELECT id, subject, date, details FROM exams WHERE date >= ?1 ORDER BY id",
            params![threshold],
        )
    }

    fn query<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<Exam>, StudyDeskError> {
        let mut stmt = conn.prepare(sql)?;
        let exams = stmt
            .query_map(params, |row| {
                Ok(Exam {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    date: row.get(2)?,
                    details: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exams)
    }
}
