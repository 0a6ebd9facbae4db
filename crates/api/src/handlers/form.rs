use crate::errors::ApiError;
use axum::extract::{multipart::Field, Multipart};
use bytes::{Bytes, BytesMut};

const FILES_FIELD: &str = "files";
const ENTITY_TYPE_FIELD: &str = "entityType";
const ENTITY_ID_FIELD: &str = "entityId";

/// A file part read from the request.
pub(super) struct ReceivedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Parsed `POST /api/upload` body.
#[derive(Default)]
pub(super) struct UploadForm {
    pub files: Vec<ReceivedFile>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

pub(super) async fn read_upload_form(
    mut multipart: Multipart,
    max_file_size_bytes: usize,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(ApiError::from_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILES_FIELD => {
                let file = read_file(field, max_file_size_bytes).await?;
                form.files.push(file);
            }
            ENTITY_TYPE_FIELD => {
                form.entity_type = Some(field.text().await.map_err(ApiError::from_multipart)?);
            }
            ENTITY_ID_FIELD => {
                form.entity_id = Some(field.text().await.map_err(ApiError::from_multipart)?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// Streams one file part, failing as soon as it grows past the limit.
async fn read_file(mut field: Field<'_>, max_file_size_bytes: usize) -> Result<ReceivedFile, ApiError> {
    let filename = field
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or("file")
        .to_string();
    let content_type = field
        .content_type()
        .map(str::to_string)
        .unwrap_or_else(|| {
            mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        });

    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(ApiError::from_multipart)? {
        if data.len() + chunk.len() > max_file_size_bytes {
            return Err(ApiError::PayloadTooLarge {
                filename,
                limit_bytes: max_file_size_bytes,
            });
        }
        data.extend_from_slice(&chunk);
    }

    Ok(ReceivedFile {
        filename,
        content_type,
        data: data.freeze(),
    })
}
