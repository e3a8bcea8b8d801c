//! qx-export CLI
//!
//! Athena query-execution export to S3.

use clap::Parser;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout stays clean)
    run::init_logging(args.log_level)?;

    // Run the export
    let stats = run::execute(args).await?;

    // Report results to stderr
    eprintln!();
    eprintln!("Export completed:");
    eprintln!("  Executions listed: {}", stats.ids_listed);
    eprintln!("  Records exported:  {}", stats.records_exported);
    eprintln!("  Batches uploaded:  {}", stats.batches_uploaded);
    eprintln!("  Bytes uploaded:    {}", format_bytes(stats.bytes_uploaded));

    if let Some(duration) = stats.duration() {
        eprintln!(
            "  Duration:          {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );

        if let Some(rps) = stats.records_per_second() {
            eprintln!("  Throughput:        {:.1} records/sec", rps);
        }
    }

    Ok(())
}

/// Format bytes as human-readable string.
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
