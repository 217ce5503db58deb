use rusqlite::Connection;
use serde::Serialize;

use crate::error::StudyDeskError;
use crate::exams::{Exam, DEFAULT_EXAM_TIME};
use crate::homework::Homework;
use crate::tasks::Task;

/// An upcoming item, normalized across tasks, homework, and exams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub details: String,
    pub date: String,
    pub time: String,
}

/// All items dated on or after `today`, concatenated in fixed source order:
/// tasks, then homework, then exams (storage order within each source).
/// Exams carry no stored time, so they get DEFAULT_EXAM_TIME. The list is
/// intentionally not re-sorted across sources.
pub fn upcoming(conn: &Connection, today: &str) -> Result<Vec<Notification>, StudyDeskError> {
    let mut notifications = Vec::new();

    for task in Task::get_upcoming(conn, today)? {
        notifications.push(Notification {
            subject: task.subject,
            details: task.description,
            date: task.date,
            time: task.time,
        });
    }

    for homework in Homework::get_upcoming(conn, today)? {
        notifications.push(Notification {
            subject: homework.subject,
            details: homework.details,
            date: homework.date,
            time: homework.time,
        });
    }

    for exam in Exam::get_upcoming(conn, today)? {
        notifications.push(Notification {
            subject: exam.subject,
            details: exam.details,
            date: exam.date,
            time: DEFAULT_EXAM_TIME.to_string(),
        });
    }

    Ok(notifications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use pretty_assertions::assert_eq;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        Database::ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_task_fields_pass_through() {
        let conn = test_conn();
        Task::create(&conn, "Chem", "Read ch.3", "2025-03-10", "09:00").unwrap();

        let items = upcoming(&conn, "2025-03-10").unwrap();
        assert_eq!(
            items,
            vec![Notification {
                subject: "Chem".to_string(),
                details: "Read ch.3".to_string(),
                date: "2025-03-10".to_string(),
                time: "09:00".to_string(),
            }]
        );
    }

    #[test]
    fn test_exam_synthesizes_default_time() {
        let conn = test_conn();
        Exam::create(&conn, "Physics", "2025-03-11", "Ch1-3").unwrap();

        let items = upcoming(&conn, "2025-03-10").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subject, "Physics");
        assert_eq!(items[0].details, "Ch1-3");
        assert_eq!(items[0].date, "2025-03-11");
        assert_eq!(items[0].time, "08:00");
    }

    #[test]
    fn test_sources_concatenate_in_fixed_order() {
        let conn = test_conn();
        // Inserted in reverse of the expected output order
        Exam::create(&conn, "Exam", "2025-03-10", "e").unwrap();
        Homework::create(&conn, "Homework", "h", None, "2025-03-11", "12:00").unwrap();
        Task::create(&conn, "Task", "t", "2025-03-12", "09:00").unwrap();

        let items = upcoming(&conn, "2025-03-10").unwrap();
        let subjects: Vec<&str> = items.iter().map(|n| n.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Task", "Homework", "Exam"]);
    }

    #[test]
    fn test_past_items_are_excluded() {
        let conn = test_conn();
        Task::create(&conn, "Old task", "t", "2025-03-09", "09:00").unwrap();
        Homework::create(&conn, "Old homework", "h", None, "2025-03-01", "12:00").unwrap();
        Exam::create(&conn, "Old exam", "2025-02-28", "e").unwrap();

        let items = upcoming(&conn, "2025-03-10").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_serializes_to_unified_shape() {
        let item = Notification {
            subject: "Chem".to_string(),
            details: "Read ch.3".to_string(),
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "subject": "Chem",
                "details": "Read ch.3",
                "date": "2025-03-10",
                "time": "09:00",
            })
        );
    }
}
