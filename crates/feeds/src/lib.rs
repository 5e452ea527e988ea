//! HTTP data-source adapters for the whale watcher.
//!
//! This crate provides:
//! - Etherscan account API client for paginated transaction lists
//! - CoinGecko client for the spot ETH/USD price
//! - Source traits so the monitor can run against mocks

pub mod coingecko;
pub mod error;
pub mod etherscan;
pub mod source;

pub use coingecko::CoinGeckoClient;
pub use error::FeedError;
pub use etherscan::{EtherscanClient, TxAction};
pub use source::{PriceSource, TransactionSource};
