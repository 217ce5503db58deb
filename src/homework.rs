use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::StudyDeskError;

/// A homework entry. `image` holds the stored upload filename, or None when
/// the entry was submitted without an attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Homework {
    pub id: i64,
    pub subject: String,
    pub details: String,
    pub image: Option<String>,
    pub date: String,
    pub time: String,
}

impl Homework {
    pub fn create(
        conn: &Connection,
        subject: &str,
        details: &str,
        image: Option<&str>,
        date: &str,
        time: &str,
    ) -> Result<Homework, StudyDeskError> {
        conn.execute(
            "INSERT INTO homework (subject, details, image, date, time) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![subject, details, image, date, time],
        )?;
        Ok(Homework {
            id: conn.last_insert_rowid(),
            subject: subject.to_string(),
            details: details.to_string(),
            image: image.map(|s| s.to_string()),
            date: date.to_string(),
            time: time.to_string(),
        })
    }

    pub fn get_all(conn: &Connection) -> Result<Vec<Homework>, StudyDeskError> {
        Self::query(
            conn,
            "SELECT id, subject, details, image, date, time FROM homework ORDER BY id",
            [],
        )
    }

    pub fn get_upcoming(
        conn: &Connection,
        threshold: &str,
    ) -> Result<Vec<Homework>, StudyDeskError> {
        Self::query(
            conn,
            "SELECT id, subject, details, image, date, time FROM homework WHERE date >= ?1 ORDER BY id",
            params![threshold],
        )
    }

    fn query<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<Homework>, StudyDeskError> {
        let mut stmt = conn.prepare(sql)?;
        let homework = stmt
            .query_map(params, |row| {
                Ok(Homework {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    details: row.get(2)?,
                    image: row.get(3)?,
                    date: row.get(4)?,
                    time: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(homework)
    }
}
