//! Alert and status-line formatting.
//!
//! Pure formatting, no I/O. The ether amount comes in as the exact display
//! string produced from the raw wei value; USD math happens in `f64` only
//! after that conversion, so large balances are never truncated.

use whale_core::{group_digits, Transaction};

/// Format a whale alert as a Telegram HTML message.
pub fn format_alert(tx: &Transaction, price_usd: f64) -> String {
    let value_eth = tx.value.to_ether_string();
    let usd_millions = tx.value.to_ether_f64() * price_usd / 1_000_000.0;

    format!(
        "💰 <b>Big Ethereum Transaction Alert!</b>\n\n\
         🔖 <a href=\"https://etherscan.io/tx/{hash}\">View on Etherscan</a>\n\
         🚀 Origin: <code>{from}</code>\n\
         🎯 Destination: <code>{to}</code>\n\n\
         💎 <b>{value} ETH</b> (approximately <b>${usd_millions:.2} million</b>)\n\n\
         ⏰ {time}",
        hash = tx.hash,
        from = tx.from,
        to = tx.to,
        value = group_digits(&value_eth),
        time = chrono::DateTime::from_timestamp(tx.timestamp as i64, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| tx.timestamp.to_string()),
    )
}

/// Short status line shown next to the bot identity:
/// `"$14800000.00 | 3 days ago"`.
pub fn format_status(usd_value: f64, days_ago: u64) -> String {
    format!("${usd_value:.2} | {days_ago} days ago")
}

/// Whole days elapsed since `timestamp`, truncated.
pub fn days_since(now: u64, timestamp: u64) -> u64 {
    now.saturating_sub(timestamp) / 86_400
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use whale_core::Wei;

    fn whale_tx() -> Transaction {
        Transaction {
            hash: "0xabc".to_string(),
            from: "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae".to_string(),
            to: "0x1111111111111111111111111111111111111111".to_string(),
            value: Wei::from_whole_ether(9000),
            is_error: false,
            timestamp: 1_681_000_000,
        }
    }

    #[test]
    fn test_alert_contains_link_addresses_and_grouped_value() {
        let alert = format_alert(&whale_tx(), 2000.0);
        assert!(alert.contains("https://etherscan.io/tx/0xabc"));
        assert!(alert.contains("0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae"));
        assert!(alert.contains("0x1111111111111111111111111111111111111111"));
        assert!(alert.contains("9 000 ETH"));
        // 9000 ETH * $2000 = $18M
        assert!(alert.contains("$18.00 million"));
    }

    #[test]
    fn test_status_line() {
        assert_eq!(format_status(14_800_000.0, 3), "$14800000.00 | 3 days ago");
        assert_eq!(format_status(0.5, 0), "$0.50 | 0 days ago");
    }

    #[test]
    fn test_days_since_truncates() {
        let ts = 1_681_000_000;
        assert_eq!(days_since(ts, ts), 0);
        assert_eq!(days_since(ts + 86_399, ts), 0);
        assert_eq!(days_since(ts + 86_400, ts), 1);
        assert_eq!(days_since(ts + 3 * 86_400 + 100, ts), 3);
        // Clock skew must not underflow.
        assert_eq!(days_since(ts - 10, ts), 0);
    }
}
