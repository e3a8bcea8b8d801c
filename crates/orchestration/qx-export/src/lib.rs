//! qx-export - Athena query-execution export pipeline.
//!
//! This crate drains the Athena query execution history into object
//! storage. It supports:
//!
//! - Paginated execution ID listing with lazy streaming
//! - Batch retrieval of execution details (up to 50 per call)
//! - Gzip-compressed NDJSON batch objects under unique random keys
//! - LocalStack-friendly client configuration
//!
//! # Example
//!
//! ```ignore
//! use qx_export::{
//!     AthenaConfig, AthenaSource, ExportConfig, Exporter, S3Sink, S3SinkConfig,
//! };
//!
//! // Configure the Athena source and the S3 destination
//! let source = AthenaSource::new(&AthenaConfig::new()).await?;
//! let sink = S3Sink::new(S3SinkConfig::new("my-bucket", "athena-stats/")).await?;
//!
//! // Run the export
//! let exporter = Exporter::new(source, sink, ExportConfig::default());
//! let stats = exporter.export().await?;
//! eprintln!(
//!     "Uploaded {} batches ({} records)",
//!     stats.batches_uploaded, stats.records_exported
//! );
//! ```

pub mod config;
pub mod exporter;
pub mod ndjson;
pub mod record;
pub mod sink;
pub mod source;
pub mod stats;

pub use config::{ExportConfig, MAX_BATCH_SIZE};
pub use exporter::Exporter;
pub use record::{ExecutionRecord, ExecutionStatistics, ExecutionStatus};
pub use sink::{create_s3_client, S3Sink, S3SinkConfig, Sink, UploadReceipt};
pub use source::{
    create_athena_client, list_execution_ids, AthenaConfig, AthenaSource, ExecutionPage,
    ExecutionSource,
};
pub use stats::ExportStats;
