use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single file received from a client, before any processing.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub original_filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub data: Bytes,
    pub target_folder: String,
}

impl UploadRequest {
    pub fn new(
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
        data: Bytes,
        target_folder: impl Into<String>,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            mime_type: mime_type.into(),
            size_bytes: data.len() as u64,
            data,
            target_folder: target_folder.into(),
        }
    }
}

/// Per-file outcome of a batch upload.
///
/// Exactly one of `url` (on success) or `error` (on failure) is set; use
/// [`UploadResult::succeeded`] and [`UploadResult::failed`] to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResult {
    pub fn succeeded(request: &UploadRequest, url: String) -> Self {
        Self {
            filename: request.original_filename.clone(),
            content_type: request.mime_type.clone(),
            size: request.size_bytes,
            success: true,
            url: Some(url),
            error: None,
        }
    }

    pub fn failed(request: &UploadRequest, error: String) -> Self {
        Self {
            filename: request.original_filename.clone(),
            content_type: request.mime_type.clone(),
            size: request.size_bytes,
            success: false,
            url: None,
            error: Some(error),
        }
    }
}
