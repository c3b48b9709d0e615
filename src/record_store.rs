//! Record lookup against the external record store.

use crate::core::record::{Record, RecordKind};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Query side of the external record store. Mutation of records happens
/// elsewhere; the core only reads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records owned by `owner_id`, optionally filtered by kind, ordered
    /// by timestamp descending.
    async fn find_records(&self, owner_id: &str, kind: Option<RecordKind>) -> Result<Vec<Record>>;
}

#[derive(Debug, Deserialize)]
struct RecordsFile {
    records: Vec<Record>,
}

/// Record store backed by a YAML file of records.
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<Record>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read records file: {}", self.path.display()))?;
        let file: RecordsFile = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse records file: {}", self.path.display()))?;
        Ok(file.records)
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn find_records(&self, owner_id: &str, kind: Option<RecordKind>) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = self
            .load()?
            .into_iter()
            .filter(|r| r.owner_id == owner_id)
            .filter(|r| kind.is_none_or(|k| r.kind == k))
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!(
            "Loaded {} records for owner {} from {}",
            records.len(),
            owner_id,
            self.path.display()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORDS_YAML: &str = r#"
records:
  - id: "r1"
    owner_id: "alice"
    kind: expense
    amount: "10.00"
    currency: "USD"
    category: "groceries"
    timestamp: "2023-03-15T12:00:00Z"
  - id: "r2"
    owner_id: "alice"
    kind: income
    amount: "1200.00"
    currency: "EUR"
    timestamp: "2023-04-01T09:00:00Z"
  - id: "r3"
    owner_id: "bob"
    kind: expense
    amount: "5.00"
    currency: "EUR"
    timestamp: "2023-03-20T08:00:00Z"
"#;

    fn store_with_fixture() -> (tempfile::NamedTempFile, FileRecordStore) {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(RECORDS_YAML.as_bytes()).unwrap();
        let store = FileRecordStore::new(file.path());
        (file, store)
    }

    #[tokio::test]
    async fn test_filters_by_owner() {
        let (_file, store) = store_with_fixture();
        let records = store.find_records("alice", None).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.owner_id == "alice"));
    }

    #[tokio::test]
    async fn test_filters_by_kind() {
        let (_file, store) = store_with_fixture();
        let records = store
            .find_records("alice", Some(RecordKind::Expense))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "r1");
    }

    #[tokio::test]
    async fn test_orders_by_timestamp_descending() {
        let (_file, store) = store_with_fixture();
        let records = store.find_records("alice", None).await.unwrap();
        assert_eq!(records[0].id, "r2");
        assert_eq!(records[1].id, "r1");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let store = FileRecordStore::new("/nonexistent/records.yaml");
        assert!(store.find_records("alice", None).await.is_err());
    }
}
