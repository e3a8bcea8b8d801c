//! Error types for the qx-export pipeline.
//!
//! This crate provides:
//! - [`ExportError`] - Top-level error enum for all export errors
//! - [`Result`] - Result alias used throughout the pipeline
//!
//! The pipeline is fail-fast: the first error of any kind aborts the run,
//! so there is no retry classification here. Variants exist to keep the
//! failing stage visible in the message chain.

use thiserror::Error;

/// Top-level error type for the export pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Athena API errors (listing, batch retrieval)
    #[error("Athena error: {0}")]
    Athena(String),

    /// Object storage errors (upload)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record serialization errors
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O errors (in-memory compression)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;
