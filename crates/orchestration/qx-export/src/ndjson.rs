//! NDJSON assembly and in-memory gzip compression.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use qx_error::Result;
use serde::Serialize;

/// Serialize records as newline-delimited JSON.
///
/// One JSON object per line, each line newline-terminated. An empty slice
/// produces an empty string.
pub fn to_ndjson<T: Serialize>(records: &[T]) -> Result<String> {
    let mut payload = String::new();
    for record in records {
        payload.push_str(&serde_json::to_string(record)?);
        payload.push('\n');
    }
    Ok(payload)
}

/// Gzip-compress a byte slice entirely in memory.
pub fn gzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
