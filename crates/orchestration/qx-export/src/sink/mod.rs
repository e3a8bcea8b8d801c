//! Upload destinations for exported batches.
//!
//! This module provides the [`Sink`] trait and the S3 implementation.
//! A sink consumes one batch of records per call and creates one
//! immutable object per batch.

mod s3;

pub use s3::{create_s3_client, S3Sink, S3SinkConfig};

use async_trait::async_trait;
use qx_error::Result;

use crate::record::ExecutionRecord;

/// Receipt for one uploaded batch.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Object key the batch was written to
    pub key: String,

    /// Number of records in the batch
    pub records: usize,

    /// Compressed size of the uploaded body in bytes
    pub bytes: u64,
}

/// Trait for uploading a batch of execution records.
///
/// Each call creates an independent object under a fresh random key;
/// there is no dedup and no overwrite protection.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Upload one batch of records, returning a receipt.
    async fn upload(&self, records: &[ExecutionRecord]) -> Result<UploadReceipt>;
}
