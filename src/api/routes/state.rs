use crate::uploads::UploadStore;

/// Shared application state passed to all Axum handlers via `.with_state()`.
#[derive(Clone)]
pub struct AppState {
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(uploads: UploadStore) -> Self {
        Self { uploads }
    }
}
