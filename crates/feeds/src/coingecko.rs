//! ETH/USD spot price from the CoinGecko simple-price endpoint.

use crate::error::FeedError;
use crate::source::PriceSource;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

#[derive(Debug, Deserialize)]
struct PriceResponse {
    ethereum: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: f64,
}

/// Unauthenticated CoinGecko price client.
pub struct CoinGeckoClient {
    http: reqwest::Client,
    price_url: Url,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            price_url: Url::parse(DEFAULT_PRICE_URL).expect("default price URL is valid"),
        }
    }

    /// Override the price endpoint.
    pub fn with_price_url(mut self, price_url: Url) -> Self {
        self.price_url = price_url;
        self
    }

    fn parse_price(body: &str) -> Result<f64, FeedError> {
        let response: PriceResponse = serde_json::from_str(body)?;
        Ok(response.ethereum.usd)
    }
}

#[async_trait::async_trait]
impl PriceSource for CoinGeckoClient {
    async fn eth_usd_price(&self) -> Result<f64, FeedError> {
        let response = self.http.get(self.price_url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let body = response.text().await?;
        let price = Self::parse_price(&body)?;
        debug!(price, "fetched ETH/USD spot price");
        Ok(price)
    }
}
