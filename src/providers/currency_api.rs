use crate::core::snapshot::RateSnapshot;
use crate::rate_provider::{RateError, RateProvider};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Rate provider speaking the currencyapi-style `latest` endpoint:
/// `{ meta: { last_updated_at }, data: { CODE: { code, value } } }`.
/// Returned values are units per one unit of the configured base currency.
pub struct CurrencyApiProvider {
    base_url: String,
    api_key: String,
    base_currency: String,
}

impl CurrencyApiProvider {
    pub fn new(base_url: &str, api_key: &str, base_currency: &str) -> Self {
        CurrencyApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            base_currency: base_currency.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    meta: ResponseMeta,
    data: HashMap<String, RateEntry>,
}

#[derive(Deserialize, Debug)]
struct ResponseMeta {
    last_updated_at: String,
}

#[derive(Deserialize, Debug)]
struct RateEntry {
    #[allow(dead_code)]
    code: String,
    value: f64,
}

#[async_trait]
impl RateProvider for CurrencyApiProvider {
    #[instrument(
        name = "LatestRatesFetch",
        skip(self),
        fields(base_currency = %self.base_currency)
    )]
    async fn fetch_latest(&self, currencies: &[String]) -> Result<RateSnapshot, RateError> {
        let url = format!(
            "{}/v3/latest?apikey={}&base_currency={}&currencies={}",
            self.base_url,
            self.api_key,
            self.base_currency,
            currencies.join(",")
        );
        debug!("Requesting latest rates from {}", self.base_url);

        let client = reqwest::Client::builder()
            .user_agent("tallyfx/0.2")
            .build()
            .map_err(|e| RateError::ProviderUnavailable(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::ProviderUnavailable(format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(RateError::ProviderUnavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateError::ProviderUnavailable(format!("Body read error: {e}")))?;

        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            RateError::ProviderUnavailable(format!("Failed to parse rates response: {e}"))
        })?;
        debug!("Provider rates last updated at {}", data.meta.last_updated_at);

        let rates = data
            .data
            .into_iter()
            .map(|(code, entry)| (code, entry.value))
            .collect();

        // retrieved_at anchors the TTL to the fetch, not to the
        // provider's publication time.
        Ok(RateSnapshot::new(Utc::now(), rates))
    }
}
