use std::sync::Arc;
use upgate_uploader::Uploader;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) uploader: Arc<Uploader>,
    pub(super) max_file_size_bytes: usize,
}

impl AppState {
    pub fn new(uploader: Arc<Uploader>, max_file_size_mb: usize) -> Self {
        Self::with_file_limit_bytes(uploader, max_file_size_mb * 1024 * 1024)
    }

    pub fn with_file_limit_bytes(uploader: Arc<Uploader>, max_file_size_bytes: usize) -> Self {
        Self {
            uploader,
            max_file_size_bytes,
        }
    }
}
