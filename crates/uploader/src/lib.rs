mod errors;
mod folder;
mod service;

pub use errors::UploadError;
pub use folder::{resolve_folder, DEFAULT_FOLDER};
pub use service::Uploader;
