use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Redirect,
    Json,
};

use super::common::{error_response, ErrorResponse};
use super::state::AppState;
use crate::database::Database;
use crate::error::StudyDeskError;
use crate::homework::Homework;
use crate::utils::Utils;

/// POST /homework
///
/// Multipart body: text fields `subject` and `details`, optional file field
/// `image`. Date and time are always the server's current moment. A file
/// part with an empty filename (the browser's "no file chosen") counts as
/// no attachment.
pub async fn create_homework(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    let mut subject: Option<String> = None;
    let mut details: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(StudyDeskError::Error(format!("Malformed upload: {}", e))))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("subject") => {
                subject = Some(field.text().await.map_err(|e| {
                    error_response(StudyDeskError::Error(format!("Malformed upload: {}", e)))
                })?);
            }
            Some("details") => {
                details = Some(field.text().await.map_err(|e| {
                    error_response(StudyDeskError::Error(format!("Malformed upload: {}", e)))
                })?);
            }
            Some("image") => {
                let file_name = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    error_response(StudyDeskError::Error(format!("Malformed upload: {}", e)))
                })?;
                if let Some(file_name) = file_name.filter(|n| !n.is_empty()) {
                    image = Some((file_name, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    let subject = subject
        .ok_or(StudyDeskError::MissingField("subject"))
        .map_err(error_response)?;
    let details = details
        .ok_or(StudyDeskError::MissingField("details"))
        .map_err(error_response)?;

    let stored_image = match image {
        Some((file_name, data)) => Some(
            state
                .uploads
                .store(&file_name, &data)
                .map_err(error_response)?,
        ),
        None => None,
    };

    let conn = Database::get_connection().map_err(error_response)?;
    Homework::create(
        &conn,
        &subject,
        &details,
        stored_image.as_deref(),
        &Utils::today_string(),
        &Utils::current_time_hhmm(),
    )
    .map_err(error_response)?;

    Ok(Redirect::to("/"))
}
