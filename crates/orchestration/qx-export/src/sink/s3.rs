//! S3 sink: gzip NDJSON batches uploaded under random keys.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use qx_error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{Sink, UploadReceipt};
use crate::ndjson::{gzip_bytes, to_ndjson};
use crate::record::ExecutionRecord;

/// Configuration for the S3 sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3SinkConfig {
    /// Destination bucket name
    pub bucket: String,

    /// Key prefix for uploaded objects
    pub prefix: String,

    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// AWS profile name (optional)
    pub profile: Option<String>,
}

impl S3SinkConfig {
    /// Create a new config with the required bucket and key prefix.
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            region: None,
            endpoint: None,
            profile: None,
        }
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the AWS profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

/// Create an S3 client from configuration.
pub async fn create_s3_client(config: &S3SinkConfig) -> Result<Client> {
    use aws_config::Region;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    let aws_config = loader.load().await;

    let builder = aws_sdk_s3::config::Builder::from(&aws_config);

    // Path-style addressing for LocalStack compatibility
    let s3_config = if config.endpoint.is_some() {
        builder.force_path_style(true).build()
    } else {
        builder.build()
    };

    Ok(Client::from_conf(s3_config))
}

/// S3 sink implementation.
///
/// Each batch becomes one object at `<prefix><uuid>.json.gz`: records
/// serialized to NDJSON, gzip-compressed in memory, uploaded with
/// `Content-Type: text/plain` and `Content-Encoding: gzip`.
pub struct S3Sink {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Sink {
    /// Create a sink from configuration, building a client.
    pub async fn new(config: S3SinkConfig) -> Result<Self> {
        let client = create_s3_client(&config).await?;
        Ok(Self {
            client,
            bucket: config.bucket,
            prefix: config.prefix,
        })
    }

    /// Create a sink with an existing client (useful for testing).
    pub fn with_client(
        client: Client,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl Sink for S3Sink {
    async fn upload(&self, records: &[ExecutionRecord]) -> Result<UploadReceipt> {
        let ndjson = to_ndjson(records)?;
        let body = gzip_bytes(ndjson.as_bytes())?;
        let key = format!("{}{}.json.gz", self.prefix, Uuid::new_v4());
        let bytes = body.len() as u64;

        debug!(key = %key, records = records.len(), bytes, "Uploading batch");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("text/plain")
            .content_encoding("gzip")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ExportError::Storage(format!("S3 put object failed: {e}")))?;

        Ok(UploadReceipt {
            key,
            records: records.len(),
            bytes,
        })
    }
}
