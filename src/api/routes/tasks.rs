use axum::{extract::Form, http::StatusCode, response::Redirect, Json};
use serde::Deserialize;

use super::common::{error_response, ErrorResponse};
use crate::database::Database;
use crate::error::StudyDeskError;
use crate::tasks::{Task, DEFAULT_TASK_TIME};
use crate::utils::Utils;

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// POST /tasks
///
/// `date` defaults to today, `time` to 08:00; blank form values count as
/// absent.
pub async fn create_task(
    Form(form): Form<TaskForm>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    let subject = form
        .subject
        .ok_or(StudyDeskError::MissingField("subject"))
        .map_err(error_response)?;
    let description = form
        .description
        .ok_or(StudyDeskError::MissingField("description"))
        .map_err(error_response)?;

    let date = form
        .date
        .filter(|d| !d.is_empty())
        .unwrap_or_else(Utils::today_string);
    let time = form
        .time
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TASK_TIME.to_string());

    let conn = Database::get_connection().map_err(error_response)?;
    Task::create(&conn, &subject, &description, &date, &time).map_err(error_response)?;

    Ok(Redirect::to("/"))
}
