//! Wei amounts with exact ether conversion.
//!
//! Etherscan reports transaction values as decimal strings in wei. A `u128`
//! covers the entire ether supply (~1.2e26 wei), so amounts stay exact until
//! they are deliberately dropped to `f64` for USD math.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wei per ether: 10^18.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// A transaction value in wei, the smallest ether denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wei(pub u128);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid wei amount: {0}")]
pub struct ParseWeiError(pub String);

impl Wei {
    pub const ZERO: Wei = Wei(0);

    /// Amount for a whole number of ether.
    pub fn from_whole_ether(ether: u64) -> Self {
        Wei(ether as u128 * WEI_PER_ETHER)
    }

    /// Parse a decimal wei string as returned by Etherscan.
    pub fn from_dec_str(s: &str) -> Result<Self, ParseWeiError> {
        s.parse::<u128>()
            .map(Wei)
            .map_err(|_| ParseWeiError(s.to_string()))
    }

    /// Exact ether display string: integer division by 10^18, fractional
    /// part trimmed of trailing zeros. No floating point is involved, so
    /// large balances never lose precision here.
    pub fn to_ether_string(&self) -> String {
        let whole = self.0 / WEI_PER_ETHER;
        let frac = self.0 % WEI_PER_ETHER;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:018}");
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }

    /// Ether value as `f64`, for USD conversion only. Display strings must
    /// come from [`Wei::to_ether_string`] instead.
    pub fn to_ether_f64(&self) -> f64 {
        self.0 as f64 / WEI_PER_ETHER as f64
    }
}

impl std::fmt::Display for Wei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

/// Group the integer part of a decimal string with spaces: `8000000` ->
/// `8 000 000`. The fractional part, if any, is left untouched.
pub fn group_digits(amount: &str) -> String {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (amount, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}
