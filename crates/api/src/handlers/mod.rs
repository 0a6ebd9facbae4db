mod form;
mod health;
mod state;
mod uploads;

use axum::{http::StatusCode, routing::get, Router};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

pub use health::health;
pub use state::AppState;
pub use uploads::{delete_upload, list_uploads, upload_files};

/// Upload routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/upload",
            get(list_uploads).post(upload_files).delete(delete_upload),
        )
}

/// Upload routes with `timeout` on every route except `POST /api/upload`.
///
/// A batch upload always runs to completion so every file gets a result.
pub fn routes_with_timeout(timeout: Duration) -> Router<AppState> {
    let timeout = TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout);

    Router::new()
        .route("/health", get(health).layer(timeout.clone()))
        .route(
            "/api/upload",
            get(list_uploads)
                .delete(delete_upload)
                .layer(timeout)
                .post(upload_files),
        )
}
