//! Export run configuration.

/// Maximum number of execution details one `BatchGetQueryExecution` call
/// may request. Hard Athena API limit.
pub const MAX_BATCH_SIZE: usize = 50;

/// Configuration for an export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Execution IDs per batch (1..=50)
    pub batch_size: usize,

    /// Maximum number of batches to upload (0 = unlimited)
    pub max_batches: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            max_batches: 0,
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size, clamped to the API limit.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Set the maximum number of batches (0 = unlimited).
    pub fn with_max_batches(mut self, max_batches: usize) -> Self {
        self.max_batches = max_batches;
        self
    }
}
