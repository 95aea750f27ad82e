use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::YahooProviderConfig;
use crate::core::error::PortfolioError;
use crate::core::quote::{Quote, QuoteProvider};

// YahooQuoteProvider implementation for QuoteProvider
pub struct YahooQuoteProvider {
    base_url: String,
    timeout: Duration,
}

impl YahooQuoteProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        YahooQuoteProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &YahooProviderConfig) -> Self {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct YahooQuoteResponse {
    quote_response: QuoteResult,
}

#[derive(Deserialize, Debug)]
struct QuoteResult {
    result: Vec<Quote>,
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    #[instrument(
        name = "YahooQuoteFetch",
        skip(self),
        fields(count = symbols.len())
    )]
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, PortfolioError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/v7/finance/quote?symbols={}",
            self.base_url,
            symbols.join(",")
        );
        debug!("Requesting quotes from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("tickerbar/1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| PortfolioError::fetch_failure(symbols, e))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| PortfolioError::fetch_failure(symbols, format!("Request error: {e}")))?;

        debug!(response = ?response, "Received Yahoo response");

        if !response.status().is_success() {
            return Err(PortfolioError::fetch_failure(
                symbols,
                format!("HTTP error: {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PortfolioError::fetch_failure(symbols, e))?;

        let data: YahooQuoteResponse = serde_json::from_str(&text).map_err(|e| {
            PortfolioError::fetch_failure(symbols, format!("Failed to parse JSON response: {e}"))
        })?;

        debug!(received = data.quote_response.result.len(), "Parsed quotes");
        Ok(data.quote_response.result)
    }
}
