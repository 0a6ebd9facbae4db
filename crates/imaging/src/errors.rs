use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Invalid image data: {0}")]
    Decode(String),

    #[error("WebP encoding failed: {0}")]
    Encode(String),
}
