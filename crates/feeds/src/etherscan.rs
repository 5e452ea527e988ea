//! Etherscan account API client.
//!
//! Fetches paginated transaction lists for a single address. The API wraps
//! every response in a `{status, message, result}` envelope; `status` is the
//! string `"1"` on success and `"0"` for both real errors and the benign
//! "No transactions found" case, which callers treat as a soft failure.

use crate::error::FeedError;
use crate::source::TransactionSource;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use whale_core::Transaction;

const DEFAULT_BASE_URL: &str = "https://api.etherscan.io/api";

/// Which transaction list to query. Internal transactions are value
/// transfers made by contract execution rather than signed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxAction {
    External,
    Internal,
}

impl TxAction {
    /// The `action` query parameter value.
    pub fn as_query(&self) -> &'static str {
        match self {
            TxAction::External => "txlist",
            TxAction::Internal => "txlistinternal",
        }
    }
}

impl std::str::FromStr for TxAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" | "txlist" => Ok(TxAction::External),
            "internal" | "txlistinternal" => Ok(TxAction::Internal),
            other => Err(format!("unknown transaction action: {other}")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    result: serde_json::Value,
}

/// Client for the Etherscan account endpoints.
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    address: String,
    action: TxAction,
}

impl EtherscanClient {
    /// Create a client for one watched address.
    pub fn new(api_key: impl Into<String>, address: impl Into<String>, action: TxAction) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key: api_key.into(),
            address: address.into(),
            action,
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// The watched address.
    pub fn address(&self) -> &str {
        &self.address
    }

    fn query(&self, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("module", "account".to_string()),
            ("action", self.action.as_query().to_string()),
            ("address", self.address.clone()),
            ("startblock", "0".to_string()),
            ("endblock", "99999999".to_string()),
            ("page", page.to_string()),
            ("offset", page_size.to_string()),
            ("sort", "desc".to_string()),
            ("apikey", self.api_key.clone()),
        ]
    }

    fn parse_page(body: &str) -> Result<Vec<Transaction>, FeedError> {
        let envelope: Envelope = serde_json::from_str(body)?;
        if envelope.status != "1" {
            return Err(FeedError::Upstream(envelope.message));
        }
        Ok(serde_json::from_value(envelope.result)?)
    }
}

#[async_trait::async_trait]
impl TransactionSource for EtherscanClient {
    async fn transaction_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Transaction>, FeedError> {
        debug!(page, page_size, action = self.action.as_query(), "fetching transaction page");

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&self.query(page, page_size))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let body = response.text().await?;
        Self::parse_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use whale_core::Wei;

    fn client(action: TxAction) -> EtherscanClient {
        EtherscanClient::new("KEY", "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae", action)
    }

    #[test]
    fn test_query_parameters() {
        let query = client(TxAction::Internal).query(3, 100);
        let find = |k| query.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str());

        assert_eq!(find("module"), Some("account"));
        assert_eq!(find("action"), Some("txlistinternal"));
        assert_eq!(find("address"), Some("0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae"));
        assert_eq!(find("startblock"), Some("0"));
        assert_eq!(find("endblock"), Some("99999999"));
        assert_eq!(find("page"), Some("3"));
        assert_eq!(find("offset"), Some("100"));
        assert_eq!(find("sort"), Some("desc"));
        assert_eq!(find("apikey"), Some("KEY"));
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("external".parse::<TxAction>(), Ok(TxAction::External));
        assert_eq!("txlistinternal".parse::<TxAction>(), Ok(TxAction::Internal));
        assert!("frob".parse::<TxAction>().is_err());
    }

    #[test]
    fn test_parse_successful_page() {
        let body = r#"{
            "status": "1",
            "message": "OK",
            "result": [{
                "timeStamp": "1681000000",
                "hash": "0xabc",
                "from": "0xaa",
                "to": "0xbb",
                "value": "9000000000000000000000",
                "isError": "0"
            }]
        }"#;
        let page = EtherscanClient::parse_page(body).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].value, Wei::from_whole_ether(9000));
    }

    #[test]
    fn test_parse_soft_failure() {
        let body = r#"{"status": "0", "message": "No transactions found", "result": []}"#;
        let err = EtherscanClient::parse_page(body).unwrap_err();
        assert!(err.is_soft());
        assert!(err.to_string().contains("No transactions found"));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = EtherscanClient::parse_page("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }
}
