//! Athena-backed execution source.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_athena::Client;
use qx_error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ExecutionPage, ExecutionSource};
use crate::record::ExecutionRecord;

/// Configuration for Athena access.
///
/// All fields are optional; an empty config resolves region and
/// credentials through the SDK's default provider chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthenaConfig {
    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// AWS profile name (optional)
    pub profile: Option<String>,

    /// Work group whose executions are listed (service default when unset)
    pub work_group: Option<String>,
}

impl AthenaConfig {
    /// Create a new configuration with SDK defaults.
    pub fn new() -> Self {
        Self::default()
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

    /// Restrict listing to a work group.
    pub fn with_work_group(mut self, work_group: impl Into<String>) -> Self {
        self.work_group = Some(work_group.into());
        self
    }
}

/// Create an Athena client from configuration.
pub async fn create_athena_client(config: &AthenaConfig) -> Result<Client> {
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
    Ok(Client::new(&aws_config))
}

/// Execution source backed by the Athena API.
///
/// `list_page` wraps `ListQueryExecutions`, `batch_get` wraps
/// `BatchGetQueryExecution`. Failures propagate immediately; there is
/// no retry here.
pub struct AthenaSource {
    client: Client,
    work_group: Option<String>,
}

impl AthenaSource {
    /// Create a source from configuration, building a client.
    pub async fn new(config: &AthenaConfig) -> Result<Self> {
        let client = create_athena_client(config).await?;
        Ok(Self {
            client,
            work_group: config.work_group.clone(),
        })
    }

    /// Create a source with an existing client (useful for testing).
    pub fn with_client(client: Client, work_group: Option<String>) -> Self {
        Self { client, work_group }
    }
}

#[async_trait]
impl ExecutionSource for AthenaSource {
    async fn list_page(&self, next_token: Option<String>) -> Result<ExecutionPage> {
        let mut req = self.client.list_query_executions();

        if let Some(work_group) = &self.work_group {
            req = req.work_group(work_group);
        }

        if let Some(token) = next_token {
            req = req.next_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ExportError::Athena(format!("ListQueryExecutions failed: {e}")))?;

        Ok(ExecutionPage {
            ids: resp.query_execution_ids.unwrap_or_default(),
            next_token: resp.next_token,
        })
    }

    async fn batch_get(&self, ids: &[String]) -> Result<Vec<ExecutionRecord>> {
        let resp = self
            .client
            .batch_get_query_execution()
            .set_query_execution_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|e| ExportError::Athena(format!("BatchGetQueryExecution failed: {e}")))?;

        let unprocessed = resp.unprocessed_query_execution_ids.unwrap_or_default();
        if !unprocessed.is_empty() {
            warn!(
                count = unprocessed.len(),
                "Service skipped some execution IDs in batch retrieval"
            );
        }

        Ok(resp
            .query_executions
            .unwrap_or_default()
            .into_iter()
            .map(ExecutionRecord::from)
            .collect())
    }
}
