use axum::{extract::Form, http::StatusCode, response::Redirect, Json};
use serde::Deserialize;

use super::common::{error_response, ErrorResponse};
use crate::database::Database;
use crate::error::StudyDeskError;
use crate::exams::Exam;

#[derive(Debug, Deserialize)]
pub struct ExamForm {
    pub subject: Option<String>,
    pub date: Option<String>,
    pub details: Option<String>,
}

/// POST /exams
pub async fn create_exam(
    Form(form): Form<ExamForm>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    let subject = form
        .subject
        .ok_or(StudyDeskError::MissingField("subject"))
        .map_err(error_response)?;
    let date = form
        .date
        .ok_or(StudyDeskError::MissingField("date"))
        .map_err(error_response)?;
    let details = form
        .details
        .ok_or(StudyDeskError::MissingField("details"))
        .map_err(error_response)?;

    let conn = Database::get_connection().map_err(error_response)?;
    Exam::create(&conn, &subject, &date, &details).map_err(error_response)?;

    Ok(Redirect::to("/"))
}
