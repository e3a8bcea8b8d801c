//! Main execution logic for the qx-export CLI.

use anyhow::Result;
use qx_export::{
    AthenaConfig, AthenaSource, ExportConfig, ExportStats, Exporter, S3Sink, S3SinkConfig,
};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel};

/// Initialize logging.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr); // Log to stderr so stdout stays clean

    subscriber.init();

    Ok(())
}

/// Execute the export with the provided arguments.
pub async fn execute(args: Cli) -> Result<ExportStats> {
    // Build Athena configuration
    let mut athena_config = AthenaConfig::new();

    if let Some(region) = &args.region {
        athena_config = athena_config.with_region(region);
    }

    if let Some(endpoint) = &args.athena_endpoint {
        athena_config = athena_config.with_endpoint(endpoint);
    }

    if let Some(profile) = &args.profile {
        athena_config = athena_config.with_profile(profile);
    }

    if let Some(work_group) = &args.work_group {
        athena_config = athena_config.with_work_group(work_group);
    }

    // Build S3 sink configuration
    let mut sink_config = S3SinkConfig::new(&args.bucket, &args.prefix);

    if let Some(region) = &args.region {
        sink_config = sink_config.with_region(region);
    }

    if let Some(endpoint) = &args.s3_endpoint {
        sink_config = sink_config.with_endpoint(endpoint);
    }

    if let Some(profile) = &args.profile {
        sink_config = sink_config.with_profile(profile);
    }

    // Create source and sink
    let source = AthenaSource::new(&athena_config).await?;
    let sink = S3Sink::new(sink_config).await?;

    // Run the export
    let config = ExportConfig::new()
        .with_batch_size(args.batch_size)
        .with_max_batches(args.max_batches);

    let exporter = Exporter::new(source, sink, config);
    let stats = exporter.export().await?;

    Ok(stats)
}
