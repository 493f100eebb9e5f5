use crate::constants::{MAX_FILE_SIZE, MAX_IMAGE_DIMENSION, MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use crate::formats::is_image_media_type;

/// Validate a quality value given in the 1-100 design range
pub fn validate_quality(quality: u8) -> Result<u8> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(CompressionError::InvalidQuality(quality));
    }
    Ok(quality)
}

/// Validate a quality already normalized to [0, 1]
pub fn validate_normalized_quality(quality: f32) -> Result<f32> {
    if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
        return Err(CompressionError::QualityOutOfRange(quality));
    }
    Ok(quality)
}

/// Reject anything whose declared media type is not an image
pub fn validate_media_type(file_name: &str, media_type: &str) -> Result<()> {
    if !is_image_media_type(media_type) {
        return Err(CompressionError::UnsupportedType(format!(
            "{} ({})",
            file_name, media_type
        )));
    }
    Ok(())
}

pub fn validate_file_size(size: u64) -> Result<()> {
    if size > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(size, MAX_FILE_SIZE));
    }
    Ok(())
}

pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }
    Ok(())
}
