/// Image format utilities and type-safe format handling
///
/// Maps declared media types and file extensions onto the codecs the
/// recompression engine can write.
use crate::constants::FALLBACK_MEDIA_TYPE;
use image::ImageFormat;
use std::fmt;
use std::path::Path;

/// Image kinds the engine can re-encode into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// JPEG, the only lossy kind; honours the quality setting
    Jpeg,
    Png,
    /// WebP, written with the lossless encoder
    WebP,
    Bmp,
    Tiff,
    Gif,
}

impl ImageKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "webp" => Some(ImageKind::WebP),
            "bmp" => Some(ImageKind::Bmp),
            "tif" | "tiff" => Some(ImageKind::Tiff),
            "gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    /// Parse a media type such as `image/jpeg; charset=binary`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim();
        match essence.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            "image/webp" => Some(ImageKind::WebP),
            "image/bmp" | "image/x-ms-bmp" => Some(ImageKind::Bmp),
            "image/tiff" => Some(ImageKind::Tiff),
            "image/gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            ImageFormat::Png => Some(ImageKind::Png),
            ImageFormat::WebP => Some(ImageKind::WebP),
            ImageFormat::Bmp => Some(ImageKind::Bmp),
            ImageFormat::Tiff => Some(ImageKind::Tiff),
            ImageFormat::Gif => Some(ImageKind::Gif),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::WebP => "webp",
            ImageKind::Bmp => "bmp",
            ImageKind::Tiff => "tiff",
            ImageKind::Gif => "gif",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::WebP => "image/webp",
            ImageKind::Bmp => "image/bmp",
            ImageKind::Tiff => "image/tiff",
            ImageKind::Gif => "image/gif",
        }
    }

    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
            ImageKind::WebP => ImageFormat::WebP,
            ImageKind::Bmp => ImageFormat::Bmp,
            ImageKind::Tiff => ImageFormat::Tiff,
            ImageKind::Gif => ImageFormat::Gif,
        }
    }

    /// Whether the quality parameter changes the encoder output
    pub fn is_lossy(&self) -> bool {
        matches!(self, ImageKind::Jpeg)
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Jpeg => "JPEG",
            ImageKind::Png => "PNG",
            ImageKind::WebP => "WebP",
            ImageKind::Bmp => "BMP",
            ImageKind::Tiff => "TIFF",
            ImageKind::Gif => "GIF",
        };
        write!(f, "{}", name)
    }
}

/// Whether a declared media type belongs to the image category
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_lowercase()
        .starts_with("image/")
}

/// Media type for a file path, derived from its extension
///
/// Unknown extensions map to `application/octet-stream`, which the engine
/// then rejects as a non-image.
pub fn media_type_for_path(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            ImageKind::from_extension(ext)
                .map(|kind| kind.media_type().to_string())
                .or_else(|| ImageFormat::from_extension(ext).map(|f| f.to_mime_type().to_string()))
        })
        .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string())
}
