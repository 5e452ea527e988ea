//! Polling, filtering, and announcement deduplication.
//!
//! The poller sweeps the paginated transaction source on every tick and
//! decides whether the first qualifying transaction is genuinely new.
//! Publishing is the caller's concern; this crate only owns the state.

pub mod poller;
pub mod state;

pub use poller::{PollOutcome, Poller, PollerConfig};
pub use state::{shared_poll_state, PollState, SharedPollState};
