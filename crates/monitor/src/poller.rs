//! Pagination sweep with dedup.

use crate::state::SharedPollState;
use tracing::debug;
use whale_core::{find_qualifying, Transaction, Wei};
use whale_feeds::{FeedError, TransactionSource};

/// Poller configuration. The tick period lives with the caller; this only
/// covers one sweep.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Minimum qualifying value in wei.
    pub min_value: Wei,
    /// Transactions per page. Pages shorter than this end the sweep.
    pub page_size: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            min_value: Wei::from_whole_ether(8000),
            page_size: 100,
        }
    }
}

/// Result of one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A qualifying transaction was found and committed to the state.
    /// The caller should publish it.
    NewMatch(Transaction),
    /// The qualifying transaction is the one already announced; no-op.
    AlreadyAnnounced,
    /// No transaction on any page qualified this tick.
    NoMatch,
}

/// Sweeps the transaction source and owns announcement dedup.
pub struct Poller<S> {
    source: S,
    state: SharedPollState,
    config: PollerConfig,
}

impl<S: TransactionSource> Poller<S> {
    pub fn new(source: S, state: SharedPollState, config: PollerConfig) -> Self {
        Self { source, state, config }
    }

    /// Run one sweep: walk pages newest-first from page 1, stop at the
    /// first qualifying transaction or at a short page. Any fetch error
    /// aborts the whole tick before any state change.
    pub async fn poll_once(&self) -> Result<PollOutcome, FeedError> {
        let mut page = 1u32;
        let found = loop {
            let transactions = self
                .source
                .transaction_page(page, self.config.page_size)
                .await?;

            if let Some(tx) = find_qualifying(&transactions, self.config.min_value) {
                // Pages are newest-first and scanned in order, so the first
                // hit is the most recent qualifying transaction overall.
                break Some(tx.clone());
            }

            if transactions.len() < self.config.page_size as usize {
                debug!(page, "short page, sweep exhausted");
                break None;
            }

            page += 1;
        };

        let Some(tx) = found else {
            return Ok(PollOutcome::NoMatch);
        };

        let mut state = self.state.write().await;
        if state.is_announced(&tx.hash) {
            return Ok(PollOutcome::AlreadyAnnounced);
        }

        state.record_announcement(&tx.hash, &tx.value.to_ether_string(), tx.timestamp);
        Ok(PollOutcome::NewMatch(tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::shared_poll_state;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use whale_core::Transaction;

    fn tx(hash: &str, ether: u64) -> Transaction {
        Transaction {
            hash: hash.to_string(),
            from: "0xfrom".to_string(),
            to: "0xto".to_string(),
            value: Wei::from_whole_ether(ether),
            is_error: false,
            timestamp: 1_681_000_000,
        }
    }

    /// Source that serves fixed pages and counts how many were fetched.
    struct ScriptedSource {
        pages: Vec<Vec<Transaction>>,
        fetched: AtomicU32,
        fail_with: Option<fn() -> FeedError>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Vec<Transaction>>) -> Self {
            Self { pages, fetched: AtomicU32::new(0), fail_with: None }
        }

        fn failing(err: fn() -> FeedError) -> Self {
            Self { pages: Vec::new(), fetched: AtomicU32::new(0), fail_with: Some(err) }
        }

        fn pages_fetched(&self) -> u32 {
            self.fetched.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl TransactionSource for ScriptedSource {
        async fn transaction_page(
            &self,
            page: u32,
            _page_size: u32,
        ) -> Result<Vec<Transaction>, FeedError> {
            self.fetched.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.fail_with {
                return Err(err());
            }
            Ok(self.pages.get(page as usize - 1).cloned().unwrap_or_default())
        }
    }

    fn config(page_size: u32) -> PollerConfig {
        PollerConfig { min_value: Wei::from_whole_ether(8000), page_size }
    }

    #[tokio::test]
    async fn test_first_qualifying_wins_over_larger() {
        let source = ScriptedSource::new(vec![vec![
            tx("0xsmall", 5000),
            tx("0xmatch", 9000),
            tx("0xtiny", 100),
        ]]);
        let poller = Poller::new(source, shared_poll_state(), config(100));

        let outcome = poller.poll_once().await.unwrap();
        match outcome {
            PollOutcome::NewMatch(tx) => assert_eq!(tx.hash, "0xmatch"),
            other => panic!("expected NewMatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_match_is_announced_once() {
        let state = shared_poll_state();
        let source = ScriptedSource::new(vec![vec![tx("0xwhale", 9000)]]);
        let poller = Poller::new(source, state.clone(), config(100));

        assert!(matches!(poller.poll_once().await.unwrap(), PollOutcome::NewMatch(_)));
        assert_eq!(poller.poll_once().await.unwrap(), PollOutcome::AlreadyAnnounced);

        let state = state.read().await;
        assert_eq!(state.last_hash(), Some("0xwhale"));
        assert_eq!(state.last_value_eth(), Some("9000"));
    }

    #[tokio::test]
    async fn test_sweep_terminates_on_short_page() {
        // Two full pages and one partial page, nothing qualifying: the
        // sweep must visit all three and stop.
        let pages = vec![
            vec![tx("0xa", 1), tx("0xb", 2)],
            vec![tx("0xc", 3), tx("0xd", 4)],
            vec![tx("0xe", 5)],
        ];
        let source = ScriptedSource::new(pages);
        let poller = Poller::new(source, shared_poll_state(), config(2));

        assert_eq!(poller.poll_once().await.unwrap(), PollOutcome::NoMatch);
        assert_eq!(poller.source.pages_fetched(), 3);
    }

    #[tokio::test]
    async fn test_sweep_stops_at_first_match_page() {
        // Qualifying transaction on page 2: page 3 is never fetched.
        let pages = vec![
            vec![tx("0xa", 1), tx("0xb", 2)],
            vec![tx("0xwhale", 9000), tx("0xc", 3)],
            vec![tx("0xd", 4), tx("0xe", 5)],
        ];
        let source = ScriptedSource::new(pages);
        let poller = Poller::new(source, shared_poll_state(), config(2));

        assert!(matches!(poller.poll_once().await.unwrap(), PollOutcome::NewMatch(_)));
        assert_eq!(poller.source.pages_fetched(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_state_untouched() {
        let state = shared_poll_state();
        let source = ScriptedSource::failing(|| {
            FeedError::Upstream("No transactions found".to_string())
        });
        let poller = Poller::new(source, state.clone(), config(100));

        let err = poller.poll_once().await.unwrap_err();
        assert!(err.is_soft());
        assert!(!state.read().await.has_announcement());
    }

    #[tokio::test]
    async fn test_new_hash_replaces_previous_announcement() {
        let state = shared_poll_state();
        {
            let source = ScriptedSource::new(vec![vec![tx("0xold", 9000)]]);
            let poller = Poller::new(source, state.clone(), config(100));
            assert!(matches!(poller.poll_once().await.unwrap(), PollOutcome::NewMatch(_)));
        }
        {
            let source = ScriptedSource::new(vec![vec![tx("0xnew", 12_000)]]);
            let poller = Poller::new(source, state.clone(), config(100));
            assert!(matches!(poller.poll_once().await.unwrap(), PollOutcome::NewMatch(_)));
        }
        assert_eq!(state.read().await.last_hash(), Some("0xnew"));
    }
}
