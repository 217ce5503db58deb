use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::state::AppState;

/// GET /uploads/{filename}
///
/// Streams a stored homework image. The lookup is a filename-keyed read in
/// the upload directory; the store reduces the request to a safe basename
/// before touching the filesystem.
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    if let Some((bytes, mime)) = state.uploads.read(&filename) {
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime)
            .body(Body::from(bytes))
            .unwrap();
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("404 Not Found"))
        .unwrap()
}
