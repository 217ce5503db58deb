use axum::{
    extract::Form,
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde::Deserialize;

use super::common::{error_response, ErrorResponse};
use crate::database::Database;
use crate::error::StudyDeskError;
use crate::schedule::ScheduleSlot;

/// Form body for replacing one day's schedule. Periods left blank in the
/// form arrive as empty strings and are skipped by the storage layer.
#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    pub day: Option<String>,
    pub p1: Option<String>,
    pub p2: Option<String>,
    pub p3: Option<String>,
    pub p4: Option<String>,
    pub p5: Option<String>,
    pub p6: Option<String>,
    pub p7: Option<String>,
    pub p8: Option<String>,
}

/// POST /schedule
pub async fn update_schedule(
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    let day = form
        .day
        .ok_or(StudyDeskError::MissingField("day"))
        .map_err(error_response)?;

    let subjects = [
        form.p1, form.p2, form.p3, form.p4, form.p5, form.p6, form.p7, form.p8,
    ];

    let conn = Database::get_connection().map_err(error_response)?;
    let inserted = ScheduleSlot::replace_day(&conn, &day, &subjects).map_err(error_response)?;
    log::info!("Replaced schedule for '{}' with {} slots", day, inserted);

    Ok(Redirect::to("/"))
}
