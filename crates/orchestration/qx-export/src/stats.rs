//! Statistics for export runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Statistics collected during an export run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportStats {
    /// When the export started
    pub started_at: Option<DateTime<Utc>>,

    /// When the export completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Execution IDs drained from the listing API
    pub ids_listed: usize,

    /// Execution records fetched and uploaded
    pub records_exported: usize,

    /// Batches uploaded
    pub batches_uploaded: usize,

    /// Compressed bytes uploaded
    pub bytes_uploaded: u64,
}

impl ExportStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the export as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record one execution ID drained from the listing.
    pub fn record_listed(&mut self) {
        self.ids_listed += 1;
    }

    /// Record one uploaded batch.
    pub fn record_batch(&mut self, records: usize, bytes: u64) {
        self.records_exported += records;
        self.batches_uploaded += 1;
        self.bytes_uploaded += bytes;
    }

    /// Get the duration of the export run.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Calculate the throughput in records per second.
    pub fn records_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.records_exported as f64 / secs
            } else {
                0.0
            }
        })
    }
}
