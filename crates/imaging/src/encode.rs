use crate::errors::TranscodeError;
use image::DynamicImage;

/// libwebp's `near_lossless` level meaning "preprocessing off".
const NEAR_LOSSLESS_OFF: i32 = 100;

/// Encodes to WebP.
///
/// Opaque images use the lossless bitstream with near-lossless preprocessing
/// at `quality`. Images with alpha are encoded exactly lossless, keeping RGB
/// values under fully transparent pixels.
pub fn encode_webp(
    img: &DynamicImage,
    has_alpha: bool,
    quality: u8,
    near_lossless: bool,
) -> Result<Vec<u8>, TranscodeError> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| TranscodeError::Encode("failed to initialise encoder config".to_string()))?;
    config.quality = quality.min(100) as f32;
    config.lossless = 1;

    if has_alpha {
        config.near_lossless = NEAR_LOSSLESS_OFF;
        config.exact = 1;
    } else if near_lossless {
        config.near_lossless = quality.min(100) as i32;
    } else {
        config.lossless = 0;
    }

    let (width, height) = (img.width(), img.height());
    let memory = if has_alpha {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_advanced(&config)
            .map_err(|e| TranscodeError::Encode(format!("{:?}", e)))?
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height)
            .encode_advanced(&config)
            .map_err(|e| TranscodeError::Encode(format!("{:?}", e)))?
    };

    Ok(memory.to_vec())
}
