use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use thiserror::Error;
use upgate_storage::StorageError;
use upgate_uploader::UploadError;

use crate::models::{ErrorResponse, ErrorDetail};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("File '{filename}' exceeds the maximum size of {limit_bytes} bytes")]
    PayloadTooLarge {
        filename: String,
        limit_bytes: usize,
    },

    #[error("Request body too large: {0}")]
    RequestTooLarge(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub(crate) fn from_multipart(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::RequestTooLarge(err.body_text())
        } else {
            ApiError::Validation(format!("Failed to read multipart body: {}", err.body_text()))
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Storage(StorageError::InvalidKey(key, reason)) => {
                ApiError::Validation(format!("Invalid key '{}': {}", key, reason))
            }
            UploadError::Storage(e) => ApiError::StorageError(e.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::PayloadTooLarge { .. } | ApiError::RequestTooLarge(_) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
            }
            ApiError::StorageError(_) => (StatusCode::BAD_GATEWAY, "STORAGE_ERROR"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(code = code, "{}", self);
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::PayloadTooLarge { filename: "a".into(), limit_bytes: 50 * 1024 * 1024 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (ApiError::StorageError("x".into()), StatusCode::BAD_GATEWAY),
            (ApiError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_invalid_key_maps_to_validation() {
        let err: ApiError = UploadError::Storage(StorageError::InvalidKey(
            "../x".into(),
            "key contains '..' segment".into(),
        ))
        .into();
        assert!(matches!(err, ApiError::Validation(_)));

        let err: ApiError =
            UploadError::Storage(StorageError::DeleteError("k".into(), "denied".into())).into();
        assert!(matches!(err, ApiError::StorageError(_)));
    }
}
