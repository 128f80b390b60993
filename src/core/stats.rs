use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Point-in-time counters for one engine, for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Documents with a registered payload.
    pub document_count: usize,
    /// Documents with at least one posting. Can exceed `document_count`
    /// after a snapshot import.
    pub indexed_document_count: usize,
    pub token_count: usize,
    pub posting_count: usize,
    pub payload_bytes: usize,
    pub last_snapshot_import: Option<DateTime<Utc>>,
}
