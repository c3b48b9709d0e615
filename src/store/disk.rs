use crate::core::snapshot::RateSnapshot;
use crate::store::SnapshotStore;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const SNAPSHOT_KEY: &str = "latest";

/// Snapshot slot persisted in a fjall partition so the cache survives
/// process restarts. Only one key is ever written.
pub struct DiskSnapshotStore {
    _keyspace: Arc<Keyspace>,
    partition: PartitionHandle,
}

impl DiskSnapshotStore {
    pub fn new(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let keyspace = Arc::new(fjall::Config::new(path).open()?);
        let partition = keyspace.open_partition("rates", PartitionCreateOptions::default())?;
        Ok(Self {
            _keyspace: keyspace,
            partition,
        })
    }
}

#[async_trait]
impl SnapshotStore for DiskSnapshotStore {
    async fn read_latest(&self) -> Option<RateSnapshot> {
        let res: Result<Option<RateSnapshot>> = (|| {
            match self.partition.get(SNAPSHOT_KEY)? {
                Some(bytes) => {
                    let snapshot: RateSnapshot = serde_json::from_slice(&bytes)?;
                    debug!("Snapshot slot HIT");
                    Ok(Some(snapshot))
                }
                None => {
                    debug!("Snapshot slot MISS");
                    Ok(None)
                }
            }
        })();

        match res {
            Ok(val) => val,
            Err(e) => {
                debug!("DiskSnapshotStore read error: {}", e);
                None
            }
        }
    }

    async fn write(&self, snapshot: RateSnapshot) {
        let res: Result<()> = (|| {
            self.partition
                .insert(SNAPSHOT_KEY, serde_json::to_vec(&snapshot)?)?;
            debug!("Snapshot slot WRITE");
            Ok(())
        })();
        if let Err(e) = res {
            debug!("DiskSnapshotStore write error: {}", e);
        }
    }

    async fn delete(&self) {
        if let Err(e) = self.partition.remove(SNAPSHOT_KEY) {
            debug!("DiskSnapshotStore delete error: {}", e);
        } else {
            debug!("Snapshot slot DELETE");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn snapshot() -> RateSnapshot {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), 0.9);
        RateSnapshot::new(Utc::now(), rates)
    }

    #[tokio::test]
    async fn test_read_write_delete() {
        let dir = tempdir().unwrap();
        let store = DiskSnapshotStore::new(dir.path()).unwrap();

        assert!(store.read_latest().await.is_none());

        let snap = snapshot();
        store.write(snap.clone()).await;
        assert_eq!(store.read_latest().await, Some(snap));

        store.delete().await;
        assert!(store.read_latest().await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempdir().unwrap();
        let snap = snapshot();
        {
            let store = DiskSnapshotStore::new(dir.path()).unwrap();
            store.write(snap.clone()).await;
        }
        let store = DiskSnapshotStore::new(dir.path()).unwrap();
        assert_eq!(store.read_latest().await, Some(snap));
    }
}
