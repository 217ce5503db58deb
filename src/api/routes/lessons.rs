use axum::{extract::Form, http::StatusCode, response::Redirect, Json};
use serde::Deserialize;

use super::common::{error_response, ErrorResponse};
use crate::database::Database;
use crate::error::StudyDeskError;
use crate::lessons::Lesson;

#[derive(Debug, Deserialize)]
pub struct LessonForm {
    pub day: Option<String>,
    pub subject: Option<String>,
}

/// POST /lessons
pub async fn create_lesson(
    Form(form): Form<LessonForm>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    let day = form
        .day
        .ok_or(StudyDeskError::MissingField("day"))
        .map_err(error_response)?;
    let subject = form
        .subject
        .ok_or(StudyDeskError::MissingField("subject"))
        .map_err(error_response)?;

    let conn = Database::get_connection().map_err(error_response)?;
    Lesson::create(&conn, &day, &subject).map_err(error_response)?;

    Ok(Redirect::to("/"))
}
