use axum::{http::StatusCode, Json};
use log::error;
use serde::Serialize;

use crate::error::StudyDeskError;

/// Error response structure with user-friendly message
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map an application error onto an HTTP response: missing form fields are
/// the caller's fault (400), everything else is a server-side failure (500).
pub fn error_response(err: StudyDeskError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        StudyDeskError::MissingField(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Request failed: {}", err);
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_maps_to_bad_request() {
        let (status, body) = error_response(StudyDeskError::MissingField("day"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Missing required field: day");
    }

    #[test]
    fn test_other_errors_map_to_internal_error() {
        let (status, _) = error_response(StudyDeskError::Error("storage offline".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
