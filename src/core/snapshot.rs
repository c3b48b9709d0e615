//! Exchange-rate snapshot model and its freshness rules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How long a fetched snapshot stays usable.
pub const SNAPSHOT_TTL_HOURS: i64 = 24;

/// One fetched rate table. Rates are expressed in units per one unit of
/// the pivot currency, so converting back to the pivot divides by the rate.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateSnapshot {
    pub retrieved_at: DateTime<Utc>,
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    pub fn new(retrieved_at: DateTime<Utc>, rates: HashMap<String, f64>) -> Self {
        Self {
            retrieved_at,
            rates,
        }
    }

    /// A snapshot older than the TTL must be replaced before use.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.retrieved_at >= Duration::hours(SNAPSHOT_TTL_HOURS)
    }

    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    /// Fixed rate table used in offline mode when nothing is cached, so
    /// development against the engine never spends provider quota.
    pub fn builtin_fallback() -> Self {
        let rates = [
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("INR", 83.10),
            ("JPY", 149.50),
            ("CAD", 1.36),
        ]
        .into_iter()
        .map(|(code, value)| (code.to_string(), value))
        .collect();

        Self {
            retrieved_at: Utc::now(),
            rates,
        }
    }
}
