//! Execution listing and retrieval.
//!
//! This module provides the [`ExecutionSource`] trait (one paginated
//! listing operation plus one batch-detail operation), the Athena-backed
//! implementation, and lazy streaming of execution IDs across pages.

mod athena;

pub use athena::{create_athena_client, AthenaConfig, AthenaSource};

use async_stream::try_stream;
use async_trait::async_trait;
use futures::Stream;
use qx_error::Result;

use crate::record::ExecutionRecord;

/// One page of execution IDs from the listing API.
#[derive(Debug, Clone, Default)]
pub struct ExecutionPage {
    /// Execution IDs in API return order
    pub ids: Vec<String>,

    /// Continuation token for the next page, if any
    pub next_token: Option<String>,
}

/// Trait for listing and retrieving query executions.
///
/// Implementations wrap a managed query service: a token-paginated listing
/// operation and a batch-detail operation. Neither call retries; errors
/// surface to the caller as-is.
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    /// Fetch one page of execution IDs.
    ///
    /// Pass `None` for the first page, then the token carried by the
    /// previous page. A page without a token is the last one.
    async fn list_page(&self, next_token: Option<String>) -> Result<ExecutionPage>;

    /// Retrieve full execution records for up to 50 IDs.
    ///
    /// The 50-ID ceiling is an API constraint the caller must respect;
    /// it is not enforced here.
    async fn batch_get(&self, ids: &[String]) -> Result<Vec<ExecutionRecord>>;
}

/// Stream all execution IDs from a source, handling pagination.
///
/// IDs are yielded lazily in page order; listing stops once a page
/// carries no continuation token. Listing errors end the stream with
/// the error as its final item.
pub fn list_execution_ids<S: ExecutionSource>(
    source: &S,
) -> impl Stream<Item = Result<String>> + '_ {
    try_stream! {
        let mut next_token: Option<String> = None;

        loop {
            let page = source.list_page(next_token.take()).await?;

            for id in page.ids {
                yield id;
            }

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }
    }
}
