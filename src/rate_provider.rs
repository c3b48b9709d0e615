//! Provides the latest exchange rates for the application.

use crate::core::snapshot::RateSnapshot;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("rate provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Source of fresh rate snapshots. Implementations own transport and
/// payload concerns; callers only see a snapshot or `ProviderUnavailable`.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest rates for `currencies`, expressed in units per
    /// one unit of the pivot currency.
    async fn fetch_latest(&self, currencies: &[String]) -> Result<RateSnapshot, RateError>;
}
