//! Last-announcement state.

use std::sync::Arc;
use tokio::sync::RwLock;

/// What has been announced so far in this process's lifetime.
///
/// `last_hash` is `None` iff no qualifying transaction has ever been
/// announced. Written only by the poller after a successful match; the
/// presence updater holds a read-only handle. Nothing is persisted.
#[derive(Debug, Default)]
pub struct PollState {
    last_hash: Option<String>,
    last_value_eth: Option<String>,
    last_timestamp: Option<u64>,
}

impl PollState {
    /// Whether anything has been announced yet.
    pub fn has_announcement(&self) -> bool {
        self.last_hash.is_some()
    }

    /// Whether this hash is the one already announced.
    pub fn is_announced(&self, hash: &str) -> bool {
        self.last_hash.as_deref() == Some(hash)
    }

    /// Commit a new announcement. `value_eth` is the exact ether display
    /// string for the transaction value.
    pub fn record_announcement(&mut self, hash: &str, value_eth: &str, timestamp: u64) {
        self.last_hash = Some(hash.to_string());
        self.last_value_eth = Some(value_eth.to_string());
        self.last_timestamp = Some(timestamp);
    }

    pub fn last_hash(&self) -> Option<&str> {
        self.last_hash.as_deref()
    }

    pub fn last_value_eth(&self) -> Option<&str> {
        self.last_value_eth.as_deref()
    }

    pub fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }
}

/// Shared handle to the poll state: the poller writes, everyone else reads.
pub type SharedPollState = Arc<RwLock<PollState>>;

/// Create a fresh shared state with no announcement.
pub fn shared_poll_state() -> SharedPollState {
    Arc::new(RwLock::new(PollState::default()))
}
