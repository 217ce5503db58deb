use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::api;
use crate::api::routes::state::AppState;
use crate::error::StudyDeskError;
use crate::uploads::UploadStore;

pub struct WebServer {
    host: String,
    port: u16,
}

impl WebServer {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    pub async fn start(&self, uploads: UploadStore) -> Result<(), StudyDeskError> {
        let app = self.create_router(uploads);

        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| StudyDeskError::Error(format!("Invalid address: {}", e)))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| StudyDeskError::Error(format!("Failed to bind to {}: {}", addr, e)))?;

        log::info!("studydesk server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                log::info!("Shutdown signal received, stopping server");
            })
            .await
            .map_err(|e| StudyDeskError::Error(format!("Server error: {}", e)))?;

        log::info!("Server shutdown complete");
        Ok(())
    }

    fn create_router(&self, uploads: UploadStore) -> Router {
        let app_state = AppState::new(uploads);

        Router::new()
            // Aggregated view of all tables plus notifications
            .route("/", get(api::home::index))
            // Mutating endpoints, one per entity; all redirect to /
            .route("/schedule", post(api::schedule::update_schedule))
            .route("/lessons", post(api::lessons::create_lesson))
            .route("/tasks", post(api::tasks::create_task))
            .route("/homework", post(api::homework::create_homework))
            .route("/exams", post(api::exams::create_exam))
            // Stored homework images
            .route("/uploads/{filename}", get(api::uploads::serve_upload))
            .with_state(app_state)
    }
}

/// Waits for a shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received SIGINT (Ctrl+C)");
        },
        _ = terminate => {
            log::info!("Received SIGTERM");
        },
    }
}
