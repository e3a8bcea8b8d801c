//! End-to-end exporter tests against in-memory fakes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::{pin_mut, StreamExt};
use qx_error::{ExportError, Result};
use qx_export::{
    list_execution_ids, ExecutionPage, ExecutionRecord, ExecutionSource, ExportConfig, Exporter,
    Sink, UploadReceipt,
};
use uuid::Uuid;

/// Fake execution source serving IDs from fixed pages.
///
/// Each page carries the token that leads to the next one, so the test
/// exercises real token-passing pagination.
struct FakeSource {
    pages: Vec<ExecutionPage>,
    batch_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeSource {
    fn new(pages: Vec<ExecutionPage>) -> Self {
        Self {
            pages,
            batch_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Build a source serving `count` IDs split into pages of `page_size`.
    fn with_ids(count: usize, page_size: usize) -> Self {
        let ids: Vec<String> = (0..count).map(|i| format!("qe-{i:05}")).collect();
        let mut pages: Vec<ExecutionPage> = ids
            .chunks(page_size)
            .enumerate()
            .map(|(n, chunk)| ExecutionPage {
                ids: chunk.to_vec(),
                next_token: Some(format!("t{n}")),
            })
            .collect();

        match pages.last_mut() {
            Some(last) => last.next_token = None,
            None => pages.push(ExecutionPage::default()),
        }

        Self::new(pages)
    }

    fn batch_calls(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        self.batch_calls.clone()
    }
}

#[async_trait]
impl ExecutionSource for FakeSource {
    async fn list_page(&self, next_token: Option<String>) -> Result<ExecutionPage> {
        let index = match next_token {
            None => 0,
            Some(token) => self
                .pages
                .iter()
                .position(|p| p.next_token.as_deref() == Some(token.as_str()))
                .map(|i| i + 1)
                .ok_or_else(|| ExportError::Athena(format!("unknown token: {token}")))?,
        };

        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| ExportError::Athena(format!("no page at index {index}")))
    }

    async fn batch_get(&self, ids: &[String]) -> Result<Vec<ExecutionRecord>> {
        self.batch_calls.lock().unwrap().push(ids.to_vec());
        Ok(ids.iter().map(|id| test_record(id)).collect())
    }
}

/// Fake sink recording each upload under a fresh random key.
struct FakeSink {
    uploads: Arc<Mutex<Vec<(String, usize)>>>,
    prefix: String,
}

impl FakeSink {
    fn new(prefix: &str) -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            prefix: prefix.to_string(),
        }
    }

    fn uploads(&self) -> Arc<Mutex<Vec<(String, usize)>>> {
        self.uploads.clone()
    }
}

#[async_trait]
impl Sink for FakeSink {
    async fn upload(&self, records: &[ExecutionRecord]) -> Result<UploadReceipt> {
        let key = format!("{}{}.json.gz", self.prefix, Uuid::new_v4());
        self.uploads
            .lock()
            .unwrap()
            .push((key.clone(), records.len()));
        Ok(UploadReceipt {
            key,
            records: records.len(),
            bytes: (records.len() * 100) as u64,
        })
    }
}

fn test_record(id: &str) -> ExecutionRecord {
    ExecutionRecord {
        query_execution_id: id.to_string(),
        query: Some(format!("SELECT '{id}'")),
        statement_type: Some("DML".to_string()),
        work_group: None,
        output_location: None,
        database: None,
        catalog: None,
        status: None,
        statistics: None,
    }
}

#[tokio::test]
async fn test_export_120_ids_makes_three_batches() {
    // Page size deliberately misaligned with the batch size so batch
    // boundaries straddle page boundaries.
    let source = FakeSource::with_ids(120, 48);
    let batch_calls = source.batch_calls();
    let sink = FakeSink::new("stats/");
    let uploads = sink.uploads();

    let exporter = Exporter::new(source, sink, ExportConfig::default());
    let stats = exporter.export().await.unwrap();

    let calls = batch_calls.lock().unwrap();
    let sizes: Vec<usize> = calls.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, vec![50, 50, 20]);

    let uploads = uploads.lock().unwrap();
    assert_eq!(uploads.len(), 3);

    // Keys are distinct and all under the prefix
    for (key, _) in uploads.iter() {
        assert!(key.starts_with("stats/"));
        assert!(key.ends_with(".json.gz"));
    }
    let mut keys: Vec<&String> = uploads.iter().map(|(k, _)| k).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 3);

    assert_eq!(stats.ids_listed, 120);
    assert_eq!(stats.records_exported, 120);
    assert_eq!(stats.batches_uploaded, 3);
}

#[tokio::test]
async fn test_export_empty_listing_uploads_nothing() {
    let source = FakeSource::with_ids(0, 10);
    let batch_calls = source.batch_calls();
    let sink = FakeSink::new("stats/");
    let uploads = sink.uploads();

    let exporter = Exporter::new(source, sink, ExportConfig::default());
    let stats = exporter.export().await.unwrap();

    assert!(batch_calls.lock().unwrap().is_empty());
    assert!(uploads.lock().unwrap().is_empty());
    assert_eq!(stats.ids_listed, 0);
    assert_eq!(stats.batches_uploaded, 0);
}

#[tokio::test]
async fn test_export_partial_batch_is_flushed() {
    let source = FakeSource::with_ids(7, 3);
    let batch_calls = source.batch_calls();
    let sink = FakeSink::new("stats/");

    let exporter = Exporter::new(source, sink, ExportConfig::default());
    let stats = exporter.export().await.unwrap();

    let calls = batch_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 7);
    assert_eq!(stats.batches_uploaded, 1);
    assert_eq!(stats.records_exported, 7);
}

#[tokio::test]
async fn test_export_exact_multiple_has_no_partial_batch() {
    let source = FakeSource::with_ids(100, 100);
    let batch_calls = source.batch_calls();
    let sink = FakeSink::new("stats/");

    let exporter = Exporter::new(source, sink, ExportConfig::default());
    let stats = exporter.export().await.unwrap();

    let calls = batch_calls.lock().unwrap();
    let sizes: Vec<usize> = calls.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, vec![50, 50]);
    assert_eq!(stats.batches_uploaded, 2);
}

#[tokio::test]
async fn test_export_preserves_listing_order() {
    let source = FakeSource::with_ids(10, 4);
    let batch_calls = source.batch_calls();
    let sink = FakeSink::new("stats/");

    let config = ExportConfig::new().with_batch_size(5);
    let exporter = Exporter::new(source, sink, config);
    exporter.export().await.unwrap();

    let calls = batch_calls.lock().unwrap();
    let flattened: Vec<String> = calls.iter().flatten().cloned().collect();
    let expected: Vec<String> = (0..10).map(|i| format!("qe-{i:05}")).collect();
    assert_eq!(flattened, expected);
}

#[tokio::test]
async fn test_export_respects_max_batches() {
    let source = FakeSource::with_ids(120, 48);
    let batch_calls = source.batch_calls();
    let sink = FakeSink::new("stats/");

    let config = ExportConfig::new().with_max_batches(1);
    let exporter = Exporter::new(source, sink, config);
    let stats = exporter.export().await.unwrap();

    assert_eq!(batch_calls.lock().unwrap().len(), 1);
    assert_eq!(stats.batches_uploaded, 1);
    assert_eq!(stats.records_exported, 50);
}

#[tokio::test]
async fn test_pagination_yields_ids_in_page_order() {
    let pages = vec![
        ExecutionPage {
            ids: vec!["a1".to_string(), "a2".to_string()],
            next_token: Some("T1".to_string()),
        },
        ExecutionPage {
            ids: vec!["b1".to_string(), "b2".to_string()],
            next_token: Some("T2".to_string()),
        },
        ExecutionPage {
            ids: vec!["c1".to_string()],
            next_token: None,
        },
    ];
    let source = FakeSource::new(pages);

    let stream = list_execution_ids(&source);
    pin_mut!(stream);

    let mut ids = Vec::new();
    while let Some(id) = stream.next().await {
        ids.push(id.unwrap());
    }

    assert_eq!(ids, vec!["a1", "a2", "b1", "b2", "c1"]);
}

#[tokio::test]
async fn test_pagination_skips_empty_pages() {
    let pages = vec![
        ExecutionPage {
            ids: vec!["a1".to_string()],
            next_token: Some("T1".to_string()),
        },
        ExecutionPage {
            ids: Vec::new(),
            next_token: Some("T2".to_string()),
        },
        ExecutionPage {
            ids: vec!["c1".to_string()],
            next_token: None,
        },
    ];
    let source = FakeSource::new(pages);

    let stream = list_execution_ids(&source);
    pin_mut!(stream);

    let mut ids = Vec::new();
    while let Some(id) = stream.next().await {
        ids.push(id.unwrap());
    }

    assert_eq!(ids, vec!["a1", "c1"]);
}

/// Source whose batch operation always fails.
struct FailingSource {
    inner: FakeSource,
}

#[async_trait]
impl ExecutionSource for FailingSource {
    async fn list_page(&self, next_token: Option<String>) -> Result<ExecutionPage> {
        self.inner.list_page(next_token).await
    }

    async fn batch_get(&self, _ids: &[String]) -> Result<Vec<ExecutionRecord>> {
        Err(ExportError::Athena("ThrottlingException".to_string()))
    }
}

#[tokio::test]
async fn test_export_aborts_on_batch_error() {
    let source = FailingSource {
        inner: FakeSource::with_ids(60, 30),
    };
    let sink = FakeSink::new("stats/");
    let uploads = sink.uploads();

    let exporter = Exporter::new(source, sink, ExportConfig::default());
    let result = exporter.export().await;

    assert!(result.is_err());
    assert!(uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_export_aborts_on_listing_error() {
    // A page pointing at a token no page carries makes the next
    // list_page call fail mid-stream.
    let pages = vec![ExecutionPage {
        ids: vec!["a1".to_string()],
        next_token: Some("dangling".to_string()),
    }];
    let source = FakeSource::new(pages);
    let sink = FakeSink::new("stats/");
    let uploads = sink.uploads();

    let exporter = Exporter::new(source, sink, ExportConfig::default());
    let result = exporter.export().await;

    assert!(result.is_err());
    assert!(uploads.lock().unwrap().is_empty());
}
