pub mod disk;
pub mod memory;

use crate::core::snapshot::RateSnapshot;
use async_trait::async_trait;

/// Persistence for the single shared snapshot slot. One snapshot is live
/// at a time; `write` overwrites whatever is stored.
///
/// Storage failures degrade to a cache miss (logged, not surfaced) so a
/// broken cache backend never takes down an aggregation request.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn read_latest(&self) -> Option<RateSnapshot>;
    async fn write(&self, snapshot: RateSnapshot);
    async fn delete(&self);
}
