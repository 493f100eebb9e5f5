use crate::error::CompressionError;
use crate::input::InputFile;
use crate::processing::{recompress, CompressionOptions};
use crate::store::{ResultRecord, ResultStore};
use crate::utils::{calculate_compression_ratio, format_file_size};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// Receives per-file results as a batch progresses.
///
/// This is the seam a front end plugs into to render results incrementally.
pub trait BatchObserver {
    fn on_record(&mut self, record: &ResultRecord);

    fn on_failure(&mut self, file_name: &str, error: &CompressionError);
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct SilentObserver;

impl BatchObserver for SilentObserver {
    fn on_record(&mut self, _record: &ResultRecord) {}

    fn on_failure(&mut self, _file_name: &str, _error: &CompressionError) {}
}

/// Proof that a batch was started; only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTicket {
    generation: u64,
}

impl BatchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub generation: u64,
    pub processed: usize,
    pub failures: Vec<FileFailure>,
    pub total_original_size: u64,
    pub total_compressed_size: u64,
    pub elapsed: Duration,
    /// A newer batch started before this one finished
    pub superseded: bool,
}

impl BatchSummary {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Add a per-file failure to the report.
    pub fn record_failure(&mut self, file_name: &str, error: &CompressionError) {
        self.failures.push(FileFailure {
            file_name: file_name.to_string(),
            reason: error.to_string(),
        });
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.total_original_size, self.total_compressed_size)
    }

    pub fn print(&self) {
        crate::info!("\n📊 Batch Compression Summary:");
        crate::info!("  📁 Total files processed: {}", self.processed);
        crate::info!(
            "  📊 Total original size: {}",
            format_file_size(self.total_original_size)
        );
        crate::info!(
            "  📊 Total compressed size: {}",
            format_file_size(self.total_compressed_size)
        );
        crate::info!(
            "  🎯 Overall compression ratio: {:.1}%",
            self.compression_ratio()
        );
        crate::info!("  ⏱️  Total time: {:.2?}", self.elapsed);

        if self.failed_count() > 0 {
            crate::info!("  ⚠️  Failed files: {}", self.failed_count());
            for failure in &self.failures {
                crate::info!("     - {}: {}", failure.file_name, failure.reason);
            }
        }
        if self.superseded {
            crate::info!("  ⏭️  Superseded by a newer batch");
        }
    }
}

/// Runs batches of recompressions and owns the published [`ResultStore`].
///
/// Every batch gets a new generation. Starting a batch publishes a fresh
/// empty store for that generation, and a result is committed only while its
/// batch is still the newest one; late results from older batches are
/// dropped. Readers take `Arc` snapshots, and writers copy on write, so a
/// snapshot never changes underneath its holder.
///
/// Recompressions are serialized through a single encode slot, so at most
/// one file is being worked on at any time, even when batches overlap.
#[derive(Debug)]
pub struct BatchController {
    generation: AtomicU64,
    store: RwLock<Arc<ResultStore>>,
    encode_slot: tokio::sync::Mutex<()>,
}

impl Default for BatchController {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchController {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            store: RwLock::new(Arc::new(ResultStore::new())),
            encode_slot: tokio::sync::Mutex::new(()),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// The currently published store.
    pub fn snapshot(&self) -> Arc<ResultStore> {
        let guard = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, Arc<ResultStore>> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new generation and publish an empty store for it.
    pub fn begin_batch(&self) -> BatchTicket {
        let mut store = self.write_store();
        // Bumped under the write lock so commit() sees a consistent pair
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *store = Arc::new(ResultStore::for_generation(generation));
        BatchTicket { generation }
    }

    pub fn is_current(&self, ticket: &BatchTicket) -> bool {
        ticket.generation == self.generation()
    }

    /// Insert `record` if `ticket` still belongs to the newest batch.
    ///
    /// Returns `false`, leaving the store untouched, for a superseded ticket.
    pub fn commit(&self, ticket: &BatchTicket, record: ResultRecord) -> bool {
        let mut store = self.write_store();
        if !self.is_current(ticket) {
            return false;
        }
        Arc::make_mut(&mut *store).insert(record);
        true
    }

    /// Recompress `files` in order at the options' quality.
    ///
    /// Per-file failures are reported to the observer and skipped. The batch
    /// stops early once a newer batch has started.
    pub async fn run_batch<O>(
        &self,
        files: &[InputFile],
        options: &CompressionOptions,
        observer: &mut O,
    ) -> BatchSummary
    where
        O: BatchObserver + ?Sized,
    {
        let ticket = self.begin_batch();
        let quality = options.normalized_quality();
        let start_time = Instant::now();
        let mut summary = BatchSummary::new(ticket.generation);

        crate::verbose!(
            "Batch {} started: {} files at quality {}",
            ticket.generation,
            files.len(),
            options.quality
        );

        for file in files {
            let outcome = {
                let _slot = self.encode_slot.lock().await;
                if !self.is_current(&ticket) {
                    summary.superseded = true;
                    break;
                }
                recompress(file, quality).await
            };

            match outcome {
                Ok(record) => {
                    if !self.commit(&ticket, record.clone()) {
                        crate::verbose!(
                            "Discarding stale result for {} from batch {}",
                            record.file_name,
                            ticket.generation
                        );
                        summary.superseded = true;
                        break;
                    }
                    summary.processed += 1;
                    summary.total_original_size += record.original_size;
                    summary.total_compressed_size += record.compressed_size;
                    observer.on_record(&record);
                }
                Err(e) => {
                    if !self.is_current(&ticket) {
                        summary.superseded = true;
                        break;
                    }
                    crate::warn!("Failed to process {}: {}", file.name(), e);
                    observer.on_failure(file.name(), &e);
                    summary.record_failure(file.name(), &e);
                }
            }
        }

        summary.elapsed = start_time.elapsed();
        summary
    }
}
