use crate::core::snapshot::RateSnapshot;
use crate::store::SnapshotStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory snapshot slot, used in tests and when no data directory is
/// available.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<RateSnapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn read_latest(&self) -> Option<RateSnapshot> {
        let slot = self.slot.lock().await;
        if slot.is_some() {
            debug!("Snapshot slot HIT");
        } else {
            debug!("Snapshot slot MISS");
        }
        slot.clone()
    }

    async fn write(&self, snapshot: RateSnapshot) {
        let mut slot = self.slot.lock().await;
        debug!("Snapshot slot WRITE");
        *slot = Some(snapshot);
    }

    async fn delete(&self) {
        let mut slot = self.slot.lock().await;
        debug!("Snapshot slot DELETE");
        *slot = None;
    }
}
