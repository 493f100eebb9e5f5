//! User-selected input files.
//!
//! An [`InputFile`] is what a picker or drop zone hands to the pipeline: a
//! name, a declared media type and the raw bytes. Nothing here decodes.

use crate::error::{CompressionError, Result};
use crate::formats::media_type_for_path;
use crate::utils::is_image_file;
use crate::validation::validate_file_size;
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct InputFile {
    name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Read a file from disk, deriving the media type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        // Check size before reading anything into memory
        let size = fs::metadata(path)?.len();
        validate_file_size(size)?;

        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CompressionError::FileNotFound(path.to_path_buf()))?;

        Ok(Self {
            name,
            media_type: media_type_for_path(path),
            bytes: Arc::from(bytes),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the bytes, for moving onto the blocking pool.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Expand command line inputs into an ordered list of file paths.
///
/// Explicit files are kept whatever their extension, so the engine can report
/// non-images. Directories contribute their image files only (hidden entries
/// are skipped), and anything else is tried as a glob pattern.
pub fn collect_input_files(inputs: &[String], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            let walker = if recursive {
                WalkDir::new(path).sort_by_file_name()
            } else {
                WalkDir::new(path).max_depth(1).sort_by_file_name()
            };

            for entry in walker
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
            {
                let entry = entry?;
                if entry.file_type().is_file() && is_image_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            let pattern =
                glob(input).map_err(|_| CompressionError::NoImageFilesFound(input.clone()))?;
            let before = files.len();
            files.extend(pattern.flatten().filter(|p| p.is_file()));
            if files.len() == before {
                return Err(CompressionError::NoImageFilesFound(input.clone()));
            }
        }
    }

    Ok(files)
}
