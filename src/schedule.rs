use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::StudyDeskError;

/// Maximum number of periods a schedule day can hold.
pub const MAX_PERIODS: usize = 8;

/// One (day, period) slot of the weekly class schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: i64,
    pub day: String,
    pub period: String,
    pub subject: String,
}

impl ScheduleSlot {
    /// Replace a day's slots wholesale: delete every existing row for `day`,
    /// then insert one row per non-empty subject, labeled by its 1-based
    /// input position. Empty or absent subjects are skipped, so a sparse
    /// schedule keeps its period numbering (a subject in position 3 stays
    /// "period 3" even when position 2 is empty).
    ///
    /// The delete+insert pair runs in an immediate transaction so concurrent
    /// submissions for the same day cannot interleave.
    pub fn replace_day(
        conn: &Connection,
        day: &str,
        subjects: &[Option<String>],
    ) -> Result<usize, StudyDeskError> {
        Database::immediate_transaction(conn, |c| {
            c.execute("DELETE FROM schedule WHERE day = ?1", params![day])?;

            let mut inserted = 0;
            for (i, subject) in subjects.iter().take(MAX_PERIODS).enumerate() {
                let subject = match subject {
                    Some(s) if !s.is_empty() => s,
                    _ => continue,
                };
                c.execute(
                    "INSERT INTO schedule (day, period, subject) VALUES (?1, ?2, ?3)",
                    params![day, format!("period {}", i + 1), subject],
                )?;
                inserted += 1;
            }

            Ok(inserted)
        })
    }

    /// All slots in storage order (insertion order, i.e. period order within
    /// each day).
    pub fn get_all(conn: &Connection) -> Result<Vec<ScheduleSlot>, StudyDeskError> {
        let mut stmt =
            conn.prepare("SELECT id, day, period, subject FROM schedule ORDER BY id")?;
        let slots = stmt
            .query_map([], |row| {
                Ok(ScheduleSlot {
                    id: row.get(0)?,
                    day: row.get(1)?,
                    period: row.get(2)?,
                    subject: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(slots)
    }
}

/// One day of the schedule view: the day label and its subjects in period
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub day: String,
    pub subjects: Vec<String>,
}

/// Group flat slots into per-day sequences. Days appear in first-seen row
/// order and subjects keep their row order, so the result mirrors storage
/// exactly. Pure transform: calling it twice on the same rows yields the
/// same view.
pub fn build_week_view(slots: &[ScheduleSlot]) -> Vec<DaySchedule> {
    let mut days: Vec<DaySchedule> = Vec::new();
    for slot in slots {
        match days.iter_mut().find(|d| d.day == slot.day) {
            Some(day) => day.subjects.push(slot.subject.clone()),
            None => days.push(DaySchedule {
                day: slot.day.clone(),
                subjects: vec![slot.subject.clone()],
            }),
        }
    }
    days
}
