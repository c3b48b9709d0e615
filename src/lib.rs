pub mod cache;
pub mod cli;
pub mod core;
pub mod engine;
pub mod providers;
pub mod rate_provider;
pub mod record_store;
pub mod store;

use crate::cache::RateCache;
use crate::core::config::{AppConfig, DEFAULT_PROVIDER_BASE_URL};
use crate::engine::AggregationEngine;
use crate::record_store::{FileRecordStore, RecordStore};
use crate::store::SnapshotStore;
use crate::store::disk::DiskSnapshotStore;
use crate::store::memory::MemorySnapshotStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub enum AppCommand {
    Summary,
    Breakdown,
    Rates { refresh: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("tallyfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // One snapshot slot per process; disk-backed when a data directory is
    // usable so the cache survives restarts.
    let snapshot_store: Arc<dyn SnapshotStore> = match config
        .default_data_path()
        .and_then(|path| DiskSnapshotStore::new(&path.join("cache")))
    {
        Ok(disk) => Arc::new(disk),
        Err(e) => {
            warn!("Disk snapshot store unavailable ({e}), using in-memory store");
            Arc::new(MemorySnapshotStore::new())
        }
    };

    let (base_url, api_key) = match &config.provider {
        Some(p) => (p.base_url.as_str(), p.api_key.as_str()),
        None if config.offline => (DEFAULT_PROVIDER_BASE_URL, ""),
        None => anyhow::bail!("No rate provider configured; set provider or offline: true"),
    };
    let provider = Arc::new(providers::currency_api::CurrencyApiProvider::new(
        base_url,
        api_key,
        &config.pivot_currency,
    ));

    let rate_cache = Arc::new(RateCache::new(provider, snapshot_store, config.offline));
    let records = Arc::new(FileRecordStore::new(&config.records_path));
    let engine = AggregationEngine::new(records.clone(), Arc::clone(&rate_cache), &config.pivot_currency);

    match command {
        AppCommand::Summary => cli::summary::run(&engine, &config.owner).await,
        AppCommand::Breakdown => cli::breakdown::run(&engine, &config.owner).await,
        AppCommand::Rates { refresh } => {
            let currencies =
                currencies_in_use(records.as_ref(), &config.owner, &config.pivot_currency).await?;
            cli::rates::run(&rate_cache, &currencies, refresh).await
        }
    }
}

/// Distinct non-pivot currencies appearing in the owner's records, the
/// set a snapshot has to cover.
async fn currencies_in_use(
    records: &dyn RecordStore,
    owner: &str,
    pivot: &str,
) -> Result<Vec<String>> {
    let mut currencies: Vec<String> = records
        .find_records(owner, None)
        .await?
        .into_iter()
        .map(|r| r.currency)
        .filter(|c| c != pivot)
        .collect();
    currencies.sort();
    currencies.dedup();
    Ok(currencies)
}
