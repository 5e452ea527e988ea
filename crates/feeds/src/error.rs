//! Error types for data-source operations.

use thiserror::Error;

/// Errors that can occur while fetching from a remote HTTP API.
///
/// Nothing here is fatal to the process: a fetch error aborts the current
/// poll tick or command invocation, and the next one starts clean. No
/// retry happens at this layer.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("upstream reported no data: {0}")]
    Upstream(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}

impl FeedError {
    /// Returns true for the soft failure mode: the API answered 2xx but
    /// reported an error status in the body. Treated as "nothing to
    /// report" rather than a broken fetch.
    pub fn is_soft(&self) -> bool {
        matches!(self, FeedError::Upstream(_))
    }
}
