//! Core data types for the whale transaction watcher.

pub mod filter;
pub mod transaction;
pub mod wei;

pub use filter::*;
pub use transaction::*;
pub use wei::*;
