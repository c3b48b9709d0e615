//! TTL-bounded cache over the rate provider. Owns the single shared
//! snapshot slot and decides when the provider is actually called.

use crate::core::snapshot::RateSnapshot;
use crate::rate_provider::{RateError, RateProvider};
use crate::store::SnapshotStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RateCache {
    provider: Arc<dyn RateProvider>,
    store: Arc<dyn SnapshotStore>,
    /// When set, the provider is never called: the stored snapshot (any
    /// age) or the built-in fallback table is served as fresh.
    offline: bool,
}

impl RateCache {
    pub fn new(provider: Arc<dyn RateProvider>, store: Arc<dyn SnapshotStore>, offline: bool) -> Self {
        Self {
            provider,
            store,
            offline,
        }
    }

    /// Returns a snapshot currently valid for use, covering at least
    /// `required` currencies.
    ///
    /// A stale snapshot is only replaced after a successful fetch; if the
    /// provider is down the stale snapshot stays stored and the error is
    /// returned to the caller.
    pub async fn current_snapshot(&self, required: &[String]) -> Result<RateSnapshot, RateError> {
        let cached = self.store.read_latest().await;

        if self.offline {
            debug!("Offline mode, serving cached or fallback snapshot");
            return Ok(cached.unwrap_or_else(RateSnapshot::builtin_fallback));
        }

        match cached {
            Some(snapshot) if !snapshot.is_stale(Utc::now()) => {
                debug!("Rate cache hit, snapshot from {}", snapshot.retrieved_at);
                Ok(snapshot)
            }
            Some(stale) => {
                debug!("Rate cache stale, snapshot from {}", stale.retrieved_at);
                match self.refresh(required).await {
                    Ok(fresh) => Ok(fresh),
                    Err(e) => {
                        warn!("Rate refresh failed, keeping stale snapshot: {}", e);
                        Err(e)
                    }
                }
            }
            None => {
                debug!("Rate cache empty");
                self.refresh(required).await
            }
        }
    }

    /// Deletes the stored snapshot so the next request refetches.
    pub async fn invalidate(&self) {
        self.store.delete().await;
    }

    async fn refresh(&self, required: &[String]) -> Result<RateSnapshot, RateError> {
        let fresh = self.provider.fetch_latest(required).await?;
        self.store.write(fresh.clone()).await;
        Ok(fresh)
    }
}
