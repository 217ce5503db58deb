use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::StudyDeskError;

/// Default notification time for tasks submitted without one.
pub const DEFAULT_TASK_TIME: &str = "08:00";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

impl Task {
    pub fn create(
        conn: &Connection,
        subject: &str,
        description: &str,
        date: &str,
        time: &str,
    ) -> Result<Task, StudyDeskError> {
        conn.execute(
            "INSERT INTO tasks (subject, description, date, time) VALUES (?1, ?2, ?3, ?4)",
            params![subject, description, date, time],
        )?;
        Ok(Task {
            id: conn.last_insert_rowid(),
            subject: subject.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        })
    }

    pub fn get_all(conn: &Connection) -> Result<Vec<Task>, StudyDeskError> {
        Self::query(conn, "SELECT id, subject, description, date, time FROM tasks ORDER BY id", [])
    }

    /// Tasks dated on or after `threshold`. The comparison is lexical, which
    /// matches chronological order because dates are fixed-width ISO.
    pub fn get_upcoming(conn: &Connection, threshold: &str) -> Result<Vec<Task>, StudyDeskError> {
        Self::query(
            conn,
            "SELECT id, subject, description, date, time FROM tasks WHERE date >= ?1 ORDER BY id",
            params![threshold],
        )
    }

    fn query<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<Task>, StudyDeskError> {
        let mut stmt = conn.prepare(sql)?;
        let tasks = stmt
            .query_map(params, |row| {
                Ok(Task {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    description: row.get(2)?,
                    date: row.get(3)?,
                    time: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        Database::ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_upcoming_filters_by_date() {
        let conn = test_conn();
        Task::create(&conn, "Chem", "Read ch.3", "2025-03-10", "09:00").unwrap();
        Task::create(&conn, "Math", "Worksheet", "2025-03-09", "10:00").unwrap();
        Task::create(&conn, "Bio", "Lab report", "2025-03-11", "08:00").unwrap();

        let upcoming = Task::get_upcoming(&conn, "2025-03-10").unwrap();
        let subjects: Vec<&str> = upcoming.iter().map(|t| t.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Chem", "Bio"]);
    }

    #[test]
    fn test_upcoming_includes_threshold_date() {
        let conn = test_conn();
        Task::create(&conn, "Chem", "Read ch.3", "2025-03-10", "09:00").unwrap();
        let upcoming = Task::get_upcoming(&conn, "2025-03-10").unwrap();
        assert_eq!(upcoming.len(), 1);
    }

    #[test]
    fn test_get_all_in_insertion_order() {
        let conn = test_conn();
        Task::create(&conn, "B", "second subject first", "2025-03-10", "09:00").unwrap();
        Task::create(&conn, "A", "first subject second", "2025-03-09", "09:00").unwrap();

        let all = Task::get_all(&conn).unwrap();
        assert_eq!(all[0].subject, "B");
        assert_eq!(all[1].subject, "A");
    }
}
