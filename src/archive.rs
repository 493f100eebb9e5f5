//! Zip export of every compressed result in a store.

use crate::error::{CompressionError, Result};
use crate::store::{ResultRecord, ResultStore};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries are already compressed images, so they are stored as is.
fn entry_options() -> FileOptions {
    FileOptions::default().compression_method(CompressionMethod::Stored)
}

fn resolve_entry(record: &ResultRecord) -> Result<Vec<u8>> {
    record
        .compressed_url
        .resolve()
        .map_err(|e| CompressionError::ArchiveResolution {
            file_name: record.file_name.clone(),
            reason: e.to_string(),
        })
}

/// Bundle every record's compressed bytes into one zip archive.
///
/// Each entry is named exactly after its record's file name. An empty store
/// yields `Ok(None)`. If any entry cannot be resolved the whole build fails
/// and no partial archive is returned.
pub fn build_archive(store: &ResultStore) -> Result<Option<Vec<u8>>> {
    if store.is_empty() {
        return Ok(None);
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = entry_options();

    for record in store {
        let bytes = resolve_entry(record)?;
        zip.start_file(record.file_name.as_str(), options)?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip.finish()?;
    crate::verbose!("Archived {} entries", store.len());
    Ok(Some(cursor.into_inner()))
}

/// Build the archive and write it to `path`.
///
/// Returns the archive size, or `None` when the store was empty and nothing
/// was written.
pub fn write_archive(store: &ResultStore, path: &Path) -> Result<Option<u64>> {
    let Some(bytes) = build_archive(store)? else {
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    Ok(Some(bytes.len() as u64))
}

/// Write one record's compressed bytes into `dir` under its file name.
pub fn save_record(record: &ResultRecord, dir: &Path) -> Result<PathBuf> {
    let bytes = record.compressed_url.resolve()?;
    let name = Path::new(&record.file_name)
        .file_name()
        .ok_or_else(|| CompressionError::FileNotFound(PathBuf::from(&record.file_name)))?;

    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}
