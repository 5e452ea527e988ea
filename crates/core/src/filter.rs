//! Qualifying-transaction predicate.

use crate::{transaction::Transaction, wei::Wei};

/// Find the first qualifying transaction in a page.
///
/// Pages arrive newest-first, so the first transaction that is not an
/// on-chain error and carries at least `min_value` is the most recent
/// qualifying one. Returns `None` when nothing on this page qualifies.
pub fn find_qualifying(transactions: &[Transaction], min_value: Wei) -> Option<&Transaction> {
    transactions
        .iter()
        .find(|tx| !tx.is_error && tx.value >= min_value)
}
