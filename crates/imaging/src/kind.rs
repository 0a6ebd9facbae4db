/// Extensions (lower-case, with dot) that are transcoded on upload.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

pub const TRANSCODED_CONTENT_TYPE: &str = "image/webp";

/// Case-insensitive membership test against [`IMAGE_EXTENSIONS`].
pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
}

/// How an uploaded file is handled, decided once from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Re-encoded to WebP before storage.
    Image,
    /// Stored byte-for-byte with its original content type.
    Passthrough,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Self {
        if is_image_extension(ext) {
            MediaKind::Image
        } else {
            MediaKind::Passthrough
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, MediaKind::Image)
    }

    /// Content type to store the object with.
    pub fn content_type(self, original: &str) -> &str {
        match self {
            MediaKind::Image => TRANSCODED_CONTENT_TYPE,
            MediaKind::Passthrough => original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension(".jpg"));
        assert!(is_image_extension(".JPEG"));
        assert!(is_image_extension(".Png"));
        assert!(is_image_extension(".webp"));
        assert!(!is_image_extension(".gif"));
        assert!(!is_image_extension("jpg"));
        assert!(!is_image_extension(""));
    }

    #[test]
    fn test_media_kind_resolution() {
        let image = MediaKind::from_extension(".PNG");
        assert_eq!(image, MediaKind::Image);
        assert_eq!(image.content_type("image/png"), "image/webp");

        let other = MediaKind::from_extension(".pdf");
        assert_eq!(other, MediaKind::Passthrough);
        assert_eq!(other.content_type("application/pdf"), "application/pdf");
    }
}
