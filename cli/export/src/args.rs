//! CLI argument definitions for qx-export.

use clap::{Parser, ValueEnum};

/// Athena query-execution export to S3.
///
/// Drains the Athena query execution history and uploads it to S3 as
/// gzip-compressed NDJSON, one object per batch of up to 50 executions.
/// Credentials and region resolve through the standard AWS provider
/// chain unless overridden.
///
/// ## Examples
///
/// Basic usage:
///   qx-export my-bucket athena-stats/
///
/// Against LocalStack:
///   qx-export my-bucket athena-stats/ \
///       --athena-endpoint http://localhost:4566 \
///       --s3-endpoint http://localhost:4566
///
/// Restricted to one work group:
///   qx-export my-bucket athena-stats/ --work-group primary
#[derive(Parser, Debug)]
#[command(name = "qx-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Destination ===
    /// S3 bucket name to upload query executions to
    pub bucket: String,

    /// Key prefix under which uploaded objects are stored
    pub prefix: String,

    // === AWS Configuration ===
    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Custom Athena endpoint URL (for LocalStack)
    #[arg(long, env = "QX_ATHENA_ENDPOINT")]
    pub athena_endpoint: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "QX_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    // === Listing Options ===
    /// Work group whose executions are listed (service default when unset)
    #[arg(long)]
    pub work_group: Option<String>,

    // === Batching Options ===
    /// Executions per batch (1-50)
    #[arg(long, default_value = "50", value_parser = parse_batch_size)]
    pub batch_size: usize,

    /// Maximum number of batches to upload (0 = unlimited)
    #[arg(long, default_value = "0")]
    pub max_batches: usize,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse batch size (1-50, the BatchGetQueryExecution ceiling).
fn parse_batch_size(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(1..=50).contains(&value) {
        return Err(format!("{} is not in 1..=50", value));
    }
    Ok(value)
}
