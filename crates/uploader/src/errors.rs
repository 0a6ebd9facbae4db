use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Transcode(#[from] upgate_imaging::TranscodeError),

    #[error(transparent)]
    Storage(#[from] upgate_storage::StorageError),

    #[error("Background task failed: {0}")]
    Task(String),
}
