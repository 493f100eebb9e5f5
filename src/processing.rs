use crate::constants::{DEFAULT_QUALITY, MAX_QUALITY};
use crate::data_url::DataUrl;
use crate::error::{CompressionError, Result};
use crate::formats::ImageKind;
use crate::input::InputFile;
use crate::store::ResultRecord;
use crate::validation::{
    validate_dimensions, validate_file_size, validate_media_type, validate_normalized_quality,
    validate_quality,
};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    /// Quality in the 1-100 design range
    pub quality: u8,
}

impl CompressionOptions {
    pub fn new(quality: Option<u8>) -> Result<Self> {
        let quality = validate_quality(quality.unwrap_or(DEFAULT_QUALITY))?;
        Ok(Self { quality })
    }

    /// Quality as the engine expects it, in [0, 1]
    pub fn normalized_quality(&self) -> f32 {
        f32::from(self.quality) / f32::from(MAX_QUALITY)
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// A decoded raster plus the kind it will be written back as
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub file_name: String,
    pub image: DynamicImage,
    pub kind: ImageKind,
}

#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
}


/// Recompresses one input file at `quality` (in [0, 1]).
///
/// Runs the decode, encode and measure stages in order. A non-image media
/// type fails with [`CompressionError::UnsupportedType`] before anything is
/// decoded; an undecodable file fails with [`CompressionError::Decode`].
///
/// # Example
/// ```no_run
/// use pic_compress::{recompress, InputFile};
///
/// # async fn demo() -> pic_compress::Result<()> {
/// let file = InputFile::from_path(std::path::Path::new("photo.jpg"))?;
/// let record = recompress(&file, 0.7).await?;
/// println!("{} -> {} bytes", record.original_size, record.compressed_size);
/// # Ok(())
/// # }
/// ```
pub async fn recompress(file: &InputFile, quality: f32) -> Result<ResultRecord> {
    validate_media_type(file.name(), file.media_type())?;
    let quality = validate_normalized_quality(quality)?;

    let decoded = decode(file).await?;

    let encoded = tokio::task::spawn_blocking(move || encode(&decoded, quality))
        .await??;
    let compressed_size = measure(&encoded);

    crate::verbose!(
        "{}: {}x{} {} -> {} bytes",
        file.name(),
        encoded.width,
        encoded.height,
        encoded.kind,
        compressed_size
    );
    if !encoded.kind.is_lossy() {
        crate::verbose!(
            "{}: {} is re-encoded losslessly, quality has no effect",
            file.name(),
            encoded.kind
        );
    }

    Ok(ResultRecord {
        file_name: file.name().to_string(),
        original_url: DataUrl::encode(file.media_type(), file.bytes()),
        original_size: file.size(),
        compressed_url: DataUrl::encode(encoded.kind.media_type(), &encoded.bytes),
        compressed_size,
        media_type: encoded.kind.media_type().to_string(),
        width: encoded.width,
        height: encoded.height,
    })
}

/// Decodes an input file on the blocking pool.
///
/// The container is sniffed from the bytes, falling back to the declared
/// media type when sniffing fails. The output kind follows the declared type
/// and falls back to PNG when no encoder exists for it.
pub async fn decode(file: &InputFile) -> Result<DecodedImage> {
    validate_file_size(file.size())?;

    let file_name = file.name().to_string();
    let declared = ImageKind::from_media_type(file.media_type());
    let bytes = file.shared_bytes();

    tokio::task::spawn_blocking(move || decode_bytes(file_name, &bytes, declared)).await?
}

fn decode_bytes(file_name: String, bytes: &[u8], declared: Option<ImageKind>) -> Result<DecodedImage> {
    let format = match (image::guess_format(bytes), declared) {
        (Ok(format), _) => format,
        (Err(_), Some(kind)) => kind.to_image_format(),
        (Err(source), None) => return Err(CompressionError::Decode { file_name, source }),
    };

    let image = match image::load_from_memory_with_format(bytes, format) {
        Ok(image) => image,
        Err(source) => return Err(CompressionError::Decode { file_name, source }),
    };

    let (width, height) = image.dimensions();
    validate_dimensions(width, height)?;

    let kind = declared
        .or_else(|| ImageKind::from_image_format(format))
        .unwrap_or(ImageKind::Png);

    Ok(DecodedImage {
        file_name,
        image,
        kind,
    })
}

/// JPEG quality for a normalized quality value
pub fn jpeg_quality(quality: f32) -> u8 {
    ((quality * 100.0).round() as u8).clamp(1, 100)
}

/// Re-encodes a decoded image, keeping its dimensions and kind.
///
/// Only JPEG honours `quality`; the other kinds are written losslessly.
pub fn encode(decoded: &DecodedImage, quality: f32) -> Result<EncodedImage> {
    let quality = validate_normalized_quality(quality)?;
    let image = &decoded.image;
    let mut cursor = Cursor::new(Vec::new());

    let written = match decoded.kind {
        ImageKind::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(
                &mut cursor,
                jpeg_quality(quality),
            ))
        }
        ImageKind::WebP => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(&mut cursor))
        }
        ImageKind::Png | ImageKind::Tiff => image.write_to(&mut cursor, decoded.kind.to_image_format()),
        ImageKind::Bmp | ImageKind::Gif => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_to(&mut cursor, decoded.kind.to_image_format())
        }
    };

    written.map_err(|source| CompressionError::Encode {
        file_name: decoded.file_name.clone(),
        source,
    })?;

    Ok(EncodedImage {
        bytes: cursor.into_inner(),
        kind: decoded.kind,
        width: image.width(),
        height: image.height(),
    })
}

pub fn measure(encoded: &EncodedImage) -> u64 {
    encoded.bytes.len() as u64
}
