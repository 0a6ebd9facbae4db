use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Upload failed for '{0}': {1}")]
    UploadError(String, String),

    #[error("Listing failed for prefix '{0}': {1}")]
    ListError(String, String),

    #[error("Delete failed for '{0}': {1}")]
    DeleteError(String, String),

    #[error("Invalid object key '{0}': {1}")]
    InvalidKey(String, String),

    #[error("Invalid storage configuration: {0}")]
    ConfigError(String),
}
