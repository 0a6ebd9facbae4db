use crate::errors::UploadError;
use crate::folder::resolve_folder;
use bytes::Bytes;
use futures::future::join_all;
use std::sync::Arc;
use upgate_imaging::{MediaKind, Transcoder};
use upgate_models::{UploadRequest, UploadResult};
use upgate_storage::StorageBackend;
use upgate_utils::{build_key, extension_of};

/// Per-request upload coordinator.
///
/// Every file of a batch is processed independently and concurrently; a
/// failing file becomes a failed [`UploadResult`] and never affects siblings.
pub struct Uploader {
    storage: Arc<dyn StorageBackend>,
    transcoder: Arc<Transcoder>,
    default_folder: String,
}

impl Uploader {
    pub fn new(storage: Arc<dyn StorageBackend>, transcoder: Transcoder, default_folder: impl Into<String>) -> Self {
        Self {
            storage,
            transcoder: Arc::new(transcoder),
            default_folder: default_folder.into(),
        }
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }

    /// Folder for a batch tagged with an optional entity type and id.
    pub fn folder_for(&self, entity_type: Option<&str>, entity_id: Option<&str>) -> String {
        resolve_folder(entity_type, entity_id, &self.default_folder)
    }

    /// Uploads all files concurrently; `result[i]` describes `files[i]`.
    pub async fn upload_many(&self, files: Vec<UploadRequest>) -> Vec<UploadResult> {
        let outcomes = join_all(files.iter().map(|file| self.upload_one(file))).await;

        files
            .iter()
            .zip(outcomes)
            .map(|(file, outcome)| match outcome {
                Ok(url) => {
                    tracing::info!(filename = %file.original_filename, url = %url, "Upload succeeded");
                    UploadResult::succeeded(file, url)
                }
                Err(e) => {
                    tracing::warn!(filename = %file.original_filename, error = %e, "Upload failed");
                    UploadResult::failed(file, e.to_string())
                }
            })
            .collect()
    }

    /// Transcodes (images only), builds the key and stores one file. Returns its public URL.
    pub async fn upload_one(&self, file: &UploadRequest) -> Result<String, UploadError> {
        let kind = MediaKind::from_extension(&extension_of(&file.original_filename));

        let body = match kind {
            MediaKind::Image => self.transcode(file.data.clone()).await?,
            MediaKind::Passthrough => file.data.clone(),
        };

        let folder = if file.target_folder.trim().is_empty() {
            self.default_folder.as_str()
        } else {
            file.target_folder.as_str()
        };
        let key = build_key(folder, &file.original_filename, kind.is_image());

        self.storage
            .put_object(&key, body, kind.content_type(&file.mime_type))
            .await?;

        Ok(self.storage.get_url(&key))
    }

    async fn transcode(&self, data: Bytes) -> Result<Bytes, UploadError> {
        let transcoder = Arc::clone(&self.transcoder);
        let encoded = tokio::task::spawn_blocking(move || transcoder.transcode(&data))
            .await
            .map_err(|e| UploadError::Task(e.to_string()))??;
        Ok(Bytes::from(encoded))
    }

    /// Public URLs of every object whose key starts with `folder`.
    pub async fn list(&self, folder: &str) -> Result<Vec<String>, UploadError> {
        let keys = self.storage.list_objects(folder).await?;
        Ok(keys.iter().map(|key| self.storage.get_url(key)).collect())
    }

    /// Deletes by public URL or bare key. Returns the deleted key.
    pub async fn delete(&self, location: &str) -> Result<String, UploadError> {
        let key = self.storage.key_from_location(location);
        self.storage.delete_object(&key).await?;
        tracing::info!(key = %key, "Deleted upload");
        Ok(key)
    }
}
