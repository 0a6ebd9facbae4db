use crate::dimensions::fit_within;
use crate::encode::encode_webp;
use crate::errors::TranscodeError;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Encoding targets applied to every uploaded image.
#[derive(Debug, Clone)]
pub struct TranscodeSettings {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
    pub near_lossless: bool,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: 75,
            near_lossless: true,
        }
    }
}

/// Metadata read from an image buffer before transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
}

impl ImageInfo {
    fn of(img: &DynamicImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            has_alpha: img.color().has_alpha(),
        }
    }
}

/// Downsizes and re-encodes uploaded images to WebP.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    settings: TranscodeSettings,
}

impl Transcoder {
    pub fn new(settings: TranscodeSettings) -> Self {
        Self { settings }
    }

    fn decode(data: &[u8]) -> Result<DynamicImage, TranscodeError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TranscodeError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| TranscodeError::Decode(e.to_string()))
    }

    /// Reads width, height and alpha presence.
    pub fn inspect(data: &[u8]) -> Result<ImageInfo, TranscodeError> {
        Ok(ImageInfo::of(&Self::decode(data)?))
    }

    /// Fits the image inside the configured box (never upscaling) and encodes it as WebP.
    ///
    /// CPU bound; call from a blocking context.
    pub fn transcode(&self, data: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        let img = Self::decode(data)?;
        let ImageInfo { width, height, has_alpha } = ImageInfo::of(&img);

        let (target_w, target_h) =
            fit_within(width, height, self.settings.max_width, self.settings.max_height);

        let img = if (target_w, target_h) != (width, height) {
            tracing::debug!(
                from = %format!("{}x{}", width, height),
                to = %format!("{}x{}", target_w, target_h),
                "Resizing image"
            );
            img.resize_exact(target_w, target_h, FilterType::Lanczos3)
        } else {
            img
        };

        encode_webp(&img, has_alpha, self.settings.quality, self.settings.near_lossless)
    }
}
