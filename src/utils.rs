/// Utility functions for common operations
///
/// Size formatting, ratio math and progress bar setup shared by the batch
/// pipeline and the CLI.
use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, ORIGINAL_SIZE_PREFIX,
    PROGRESS_BAR_TEMPLATE, PROGRESS_SPINNER_TEMPLATE, SUCCESS_PREFIX,
    SUPPORTED_IMAGE_EXTENSIONS, WARNING_PREFIX,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Check if a file path carries a supported image extension
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Format a byte count in human-readable form
///
/// Scales by powers of 1024 up to GB and rounds to at most two decimals,
/// dropping trailing zeros: `1536` becomes `"1.5 KB"`, `1024` becomes `"1 KB"`.
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string; `0` maps to `"0 Bytes"`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    // f64's Display already omits trailing zeros
    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit_index])
}

/// Calculate compression ratio as a percentage
///
/// Positive means the output shrank, negative means it grew.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

/// Print a before/after report for a single recompressed image
pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let ratio = calculate_compression_ratio(original_size, compressed_size);

    crate::info!("{} {}", ORIGINAL_SIZE_PREFIX, format_file_size(original_size));
    crate::info!(
        "{} {}",
        COMPRESSED_SIZE_PREFIX,
        format_file_size(compressed_size)
    );
    crate::info!("{} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio);

    if ratio > 0.0 {
        crate::info!("{} Successfully reduced file size by {:.1}%", SUCCESS_PREFIX, ratio);
    } else {
        crate::info!("{}  File size increased by {:.1}%", WARNING_PREFIX, ratio.abs());
    }
}

/// Progress bar sized to a batch; hidden in quiet mode
pub fn create_progress_bar(len: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}
