//! Main Exporter implementation.

use futures::{pin_mut, StreamExt};
use qx_error::Result;
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::sink::Sink;
use crate::source::{list_execution_ids, ExecutionSource};
use crate::stats::ExportStats;

/// The exporter that coordinates listing, batch retrieval, and upload.
///
/// Generic over the source and sink types so the same driver runs against
/// Athena + S3 in production and against in-memory fakes in tests.
pub struct Exporter<S: ExecutionSource, K: Sink> {
    source: S,
    sink: K,
    config: ExportConfig,
}

impl<S: ExecutionSource, K: Sink> Exporter<S, K> {
    /// Create a new Exporter.
    pub fn new(source: S, sink: K, config: ExportConfig) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    /// Run the export.
    ///
    /// Drains the listing stream into batches of `batch_size` IDs,
    /// fetches full records for each batch, and uploads one object per
    /// batch. A final partial batch is flushed after the listing is
    /// exhausted. Batches are strictly sequential: a batch is fully
    /// fetched and uploaded before the next ID is pulled past the
    /// boundary. The first error aborts the run.
    pub async fn export(&self) -> Result<ExportStats> {
        let mut stats = ExportStats::new();
        let mut batch: Vec<String> = Vec::with_capacity(self.config.batch_size);
        let mut batch_no: usize = 1;

        debug!(
            batch_size = self.config.batch_size,
            max_batches = self.config.max_batches,
            "Starting export"
        );

        let stream = list_execution_ids(&self.source);
        pin_mut!(stream);

        while let Some(id) = stream.next().await {
            batch.push(id?);
            stats.record_listed();

            if batch.len() == self.config.batch_size {
                self.flush(&batch, batch_no, &mut stats).await?;
                batch.clear();
                batch_no += 1;

                if self.config.max_batches > 0
                    && stats.batches_uploaded >= self.config.max_batches
                {
                    debug!(
                        max_batches = self.config.max_batches,
                        "Reached max batches limit"
                    );
                    break;
                }
            }
        }

        // Listing exhausted; flush any remaining partial batch
        if !batch.is_empty() {
            self.flush(&batch, batch_no, &mut stats).await?;
        }

        stats.complete();

        debug!(
            ids_listed = stats.ids_listed,
            records_exported = stats.records_exported,
            batches_uploaded = stats.batches_uploaded,
            bytes_uploaded = stats.bytes_uploaded,
            "Export completed"
        );

        Ok(stats)
    }

    /// Fetch one batch of records and upload it.
    async fn flush(&self, ids: &[String], batch_no: usize, stats: &mut ExportStats) -> Result<()> {
        info!(batch = batch_no, count = ids.len(), "Fetching batch");

        let records = self.source.batch_get(ids).await?;
        let receipt = self.sink.upload(&records).await?;

        info!(
            batch = batch_no,
            key = %receipt.key,
            records = receipt.records,
            bytes = receipt.bytes,
            "Uploaded batch"
        );

        stats.record_batch(receipt.records, receipt.bytes);
        Ok(())
    }
}
