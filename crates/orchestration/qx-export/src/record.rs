//! Typed model of an exported query execution.
//!
//! Mirrors the Athena `QueryExecution` shape closely enough that the
//! uploaded NDJSON lines read like the API responses they came from.
//! Fields the API did not return are omitted from the serialized output.

use aws_sdk_athena::primitives::DateTime as SdkDateTime;
use aws_sdk_athena::types::QueryExecution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single query execution as exported to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Unique execution identifier
    pub query_execution_id: String,

    /// The SQL statement that was executed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Statement type (DDL, DML, UTILITY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_type: Option<String>,

    /// Work group the query ran in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_group: Option<String>,

    /// S3 location of the query results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,

    /// Database the query ran against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Data catalog the query ran against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Execution state and lifecycle timestamps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,

    /// Execution statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ExecutionStatistics>,
}

/// State and lifecycle timestamps of a query execution.
///
/// Timestamps serialize as ISO-8601 strings (chrono's RFC 3339 form,
/// e.g. `2024-01-15T10:30:00Z`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatus {
    /// Execution state (QUEUED, RUNNING, SUCCEEDED, FAILED, CANCELLED)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Reason for the last state change, if the service reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_change_reason: Option<String>,

    /// When the query was submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_date_time: Option<DateTime<Utc>>,

    /// When the query finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date_time: Option<DateTime<Utc>>,
}

/// Statistics reported for a query execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatistics {
    /// Engine execution time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_execution_time_ms: Option<i64>,

    /// Bytes of data scanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_scanned_bytes: Option<i64>,

    /// End-to-end execution time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_execution_time_ms: Option<i64>,

    /// Time spent queued in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_queue_time_ms: Option<i64>,

    /// Time spent planning in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_planning_time_ms: Option<i64>,

    /// Service-side processing time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_processing_time_ms: Option<i64>,
}

impl From<QueryExecution> for ExecutionRecord {
    fn from(qe: QueryExecution) -> Self {
        let (database, catalog) = match qe.query_execution_context {
            Some(ctx) => (ctx.database, ctx.catalog),
            None => (None, None),
        };

        Self {
            query_execution_id: qe.query_execution_id.unwrap_or_default(),
            query: qe.query,
            statement_type: qe.statement_type.map(|t| t.as_str().to_string()),
            work_group: qe.work_group,
            output_location: qe.result_configuration.and_then(|c| c.output_location),
            database,
            catalog,
            status: qe.status.map(|s| ExecutionStatus {
                state: s.state.map(|st| st.as_str().to_string()),
                state_change_reason: s.state_change_reason,
                submission_date_time: s.submission_date_time.as_ref().and_then(to_utc),
                completion_date_time: s.completion_date_time.as_ref().and_then(to_utc),
            }),
            statistics: qe.statistics.map(|st| ExecutionStatistics {
                engine_execution_time_ms: st.engine_execution_time_in_millis,
                data_scanned_bytes: st.data_scanned_in_bytes,
                total_execution_time_ms: st.total_execution_time_in_millis,
                query_queue_time_ms: st.query_queue_time_in_millis,
                query_planning_time_ms: st.query_planning_time_in_millis,
                service_processing_time_ms: st.service_processing_time_in_millis,
            }),
        }
    }
}

/// Convert an SDK timestamp to a UTC chrono timestamp.
fn to_utc(ts: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}
