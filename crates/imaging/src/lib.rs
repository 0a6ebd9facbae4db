mod dimensions;
mod encode;
mod errors;
mod kind;
mod transcoder;

pub use dimensions::fit_within;
pub use errors::TranscodeError;
pub use kind::{is_image_extension, MediaKind, IMAGE_EXTENSIONS, TRANSCODED_CONTENT_TYPE};
pub use transcoder::{ImageInfo, TranscodeSettings, Transcoder};
