use axum::{http::StatusCode, Json};
use serde::Serialize;

use super::common::{error_response, ErrorResponse};
use crate::database::Database;
use crate::exams::Exam;
use crate::homework::Homework;
use crate::lessons::Lesson;
use crate::notifications::{self, Notification};
use crate::schedule::{build_week_view, DaySchedule, ScheduleSlot};
use crate::tasks::Task;
use crate::utils::Utils;

/// The full aggregate the index page renders: every table plus the
/// upcoming-item notifications.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub schedule: Vec<DaySchedule>,
    pub lessons: Vec<Lesson>,
    pub tasks: Vec<Task>,
    pub homework: Vec<Homework>,
    pub exams: Vec<Exam>,
    pub notifications: Vec<Notification>,
}

/// GET /
pub async fn index() -> Result<Json<IndexResponse>, (StatusCode, Json<ErrorResponse>)> {
    let conn = Database::get_connection().map_err(error_response)?;

    let slots = ScheduleSlot::get_all(&conn).map_err(error_response)?;
    let lessons = Lesson::get_all(&conn).map_err(error_response)?;
    let tasks = Task::get_all(&conn).map_err(error_response)?;
    let homework = Homework::get_all(&conn).map_err(error_response)?;
    let exams = Exam::get_all(&conn).map_err(error_response)?;
    let notifications =
        notifications::upcoming(&conn, &Utils::today_string()).map_err(error_response)?;

    Ok(Json(IndexResponse {
        schedule: build_week_view(&slots),
        lessons,
        tasks,
        homework,
        exams,
        notifications,
    }))
}
