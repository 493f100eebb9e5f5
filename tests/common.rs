#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use pic_compress::InputFile;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encode a noisy gradient so lossy encoders have something to drop.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        let noise = ((x * 31 + y * 17) % 23) as u8;
        Rgb([(x * 3) as u8 ^ noise, (y * 5) as u8, ((x + y) * 2) as u8 ^ noise])
    }));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}

pub fn png_file(name: &str) -> InputFile {
    InputFile::new(name, "image/png", image_bytes(48, 32, ImageFormat::Png))
}

pub fn jpeg_file(name: &str) -> InputFile {
    InputFile::new(name, "image/jpeg", image_bytes(64, 48, ImageFormat::Jpeg))
}

pub fn text_file(name: &str) -> InputFile {
    InputFile::new(name, "text/plain", b"not an image".to_vec())
}

/// Write real image files plus one text file into `dir`.
pub fn create_test_image_files(dir: &Path) -> Vec<PathBuf> {
    let files = [
        ("photo.jpg", Some(ImageFormat::Jpeg)),
        ("logo.png", Some(ImageFormat::Png)),
        ("notes.txt", None),
    ];

    files
        .iter()
        .map(|(name, format)| {
            let path = dir.join(name);
            let bytes = match format {
                Some(format) => image_bytes(40, 30, *format),
                None => b"not an image".to_vec(),
            };
            fs::write(&path, bytes).unwrap();
            path
        })
        .collect()
}
