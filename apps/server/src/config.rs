//! Environment configuration.
//!
//! Credentials and watch parameters come from the environment (or a
//! `.env` file); timer periods and page size are CLI flags in `main`.

use thiserror::Error;
use whale_feeds::TxAction;

/// The Ethereum Foundation address the original deployment watched.
const DEFAULT_WATCH_ADDRESS: &str = "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae";

const DEFAULT_MIN_VALUE_ETH: u64 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment or .env")]
    Missing(&'static str),

    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
}

/// Runtime configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Etherscan API key.
    pub etherscan_api_key: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Chats that receive whale alerts.
    pub chat_ids: Vec<i64>,
    /// Address whose transactions are watched.
    pub watch_address: String,
    /// Announcement threshold in whole ether.
    pub min_value_eth: u64,
    /// Which Etherscan transaction list to poll.
    pub tx_action: TxAction,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let etherscan_api_key = required("ETHERSCAN_API_KEY")?;
        let telegram_token = required("TELEGRAM_BOT_TOKEN")?;
        let chat_ids = parse_chat_ids("TELEGRAM_CHAT_IDS", &required("TELEGRAM_CHAT_IDS")?)?;

        let watch_address = std::env::var("WATCH_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_WATCH_ADDRESS.to_string());

        let min_value_eth = match std::env::var("MIN_VALUE_ETH") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("MIN_VALUE_ETH", raw))?,
            Err(_) => DEFAULT_MIN_VALUE_ETH,
        };

        let tx_action = match std::env::var("TX_ACTION") {
            Ok(raw) => raw
                .parse::<TxAction>()
                .map_err(|e| ConfigError::Invalid("TX_ACTION", e))?,
            Err(_) => TxAction::Internal,
        };

        Ok(Config {
            etherscan_api_key,
            telegram_token,
            chat_ids,
            watch_address,
            min_value_eth,
            tx_action,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Parse a comma-separated chat id list: `"-100123,456"`.
fn parse_chat_ids(name: &'static str, raw: &str) -> Result<Vec<i64>, ConfigError> {
    let ids: Result<Vec<i64>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>)
        .collect();

    match ids {
        Ok(ids) if !ids.is_empty() => Ok(ids),
        _ => Err(ConfigError::Invalid(name, raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_chat_ids() {
        assert_eq!(parse_chat_ids("X", "123").unwrap(), vec![123]);
        assert_eq!(
            parse_chat_ids("X", "-1001234, 567 ,89").unwrap(),
            vec![-1001234, 567, 89]
        );
    }

    #[test]
    fn test_parse_chat_ids_rejects_garbage() {
        assert!(parse_chat_ids("X", "").is_err());
        assert!(parse_chat_ids("X", "abc").is_err());
        assert!(parse_chat_ids("X", "1,abc").is_err());
    }
}
