use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use pic_compress::cli::{Args, Commands};
use pic_compress::logger::{self, LogLevel};
use pic_compress::utils::{create_progress_bar, create_progress_spinner, print_compression_result};
use pic_compress::{
    collect_input_files, format_file_size, recompress, save_record, write_archive,
    BatchController, BatchObserver, CompressionError, CompressionOptions, InputFile,
    ResultRecord,
};
use pic_compress::{error, info, verbose, warn};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::set_level(LogLevel::from_flags(args.quiet, args.verbose));

    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    match args.command {
        Commands::Batch {
            inputs,
            quality,
            output,
            save_dir,
            recursive,
        } => runtime.block_on(run_batch(
            &inputs,
            quality,
            &output,
            save_dir.as_deref(),
            recursive,
        )),
        Commands::Compress {
            input,
            output,
            quality,
        } => runtime.block_on(compress_single(&input, &output, quality)),
    }
}

/// Prints one line per finished file above a progress bar.
struct CardPrinter {
    progress: ProgressBar,
}

impl CardPrinter {
    fn new(len: u64) -> Self {
        Self {
            progress: create_progress_bar(len),
        }
    }

    fn finish(&self) {
        self.progress.finish_and_clear();
    }
}

impl BatchObserver for CardPrinter {
    fn on_record(&mut self, record: &ResultRecord) {
        if !logger::is_quiet() {
            self.progress.println(format!(
                "✅ {}  Original: {}  Compressed: {}  ({}% smaller)",
                record.file_name,
                format_file_size(record.original_size),
                format_file_size(record.compressed_size),
                record.savings_percent()
            ));
        }
        self.progress.inc(1);
    }

    fn on_failure(&mut self, file_name: &str, _error: &CompressionError) {
        self.progress.set_message(format!("skipped {}", file_name));
        self.progress.inc(1);
    }
}

async fn run_batch(
    inputs: &[String],
    quality: Option<u8>,
    output: &Path,
    save_dir: Option<&Path>,
    recursive: bool,
) -> Result<()> {
    let options = CompressionOptions::new(quality)?;

    info!("🚀 Starting batch compression...");
    let paths = collect_input_files(inputs, recursive)?;
    if paths.is_empty() {
        warn!("No image files found in the input path");
        return Ok(());
    }

    info!(
        "📊 Found {} files to process at quality {}",
        paths.len(),
        options.quality
    );

    let mut printer = CardPrinter::new(paths.len() as u64);
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for path in &paths {
        match InputFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                error!("Failed to read {}: {}", path.display(), e);
                printer.on_failure(&name, &e);
                unreadable.push((name, e));
            }
        }
    }

    let controller = BatchController::new();
    let mut summary = controller.run_batch(&files, &options, &mut printer).await;
    printer.finish();
    for (name, e) in &unreadable {
        summary.record_failure(name, e);
    }
    summary.print();

    let store = controller.snapshot();

    if let Some(dir) = save_dir {
        for record in store.iter() {
            let saved = save_record(record, dir)
                .with_context(|| format!("Failed to save {}", record.file_name))?;
            verbose!("Saved {}", saved.display());
        }
    }

    let written = write_archive(&store, output)
        .with_context(|| format!("Failed to build archive {}", output.display()))?;
    match written {
        Some(size) => info!(
            "📦 Archive written: {} ({}, {} files)",
            output.display(),
            format_file_size(size),
            store.len()
        ),
        None => warn!("Nothing was compressed, no archive written"),
    }

    Ok(())
}

async fn compress_single(input: &Path, output: &Path, quality: Option<u8>) -> Result<()> {
    let options = CompressionOptions::new(quality)?;

    info!("🗜️  Compressing image: {}", input.display());
    info!("📁 Output: {}", output.display());

    let file = InputFile::from_path(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let spinner = create_progress_spinner("Recompressing...");
    let record = recompress(&file, options.normalized_quality()).await;
    spinner.finish_and_clear();
    let record = record?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, record.compressed_url.resolve()?)?;

    print_compression_result(record.original_size, record.compressed_size);
    Ok(())
}
