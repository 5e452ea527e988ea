//! Source traits for transaction pages and spot prices.
//!
//! The monitor and the command handlers depend on these instead of on the
//! concrete HTTP clients, so tests can substitute scripted sources.

use crate::error::FeedError;
use whale_core::Transaction;

/// A paginated source of transactions for the watched address.
#[async_trait::async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch one page, newest-first. Page numbers start at 1.
    async fn transaction_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Transaction>, FeedError>;
}

/// A source for the current ETH/USD spot price. Quotes are never cached;
/// callers refetch every time they need one.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn eth_usd_price(&self) -> Result<f64, FeedError>;
}

#[async_trait::async_trait]
impl<T: TransactionSource + ?Sized> TransactionSource for std::sync::Arc<T> {
    async fn transaction_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Transaction>, FeedError> {
        (**self).transaction_page(page, page_size).await
    }
}

#[async_trait::async_trait]
impl<T: PriceSource + ?Sized> PriceSource for std::sync::Arc<T> {
    async fn eth_usd_price(&self) -> Result<f64, FeedError> {
        (**self).eth_usd_price().await
    }
}
