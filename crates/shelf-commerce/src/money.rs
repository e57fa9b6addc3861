//! Price type for catalog amounts.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues. The catalog service sends prices either as JSON
//! strings (`"129.95"`) or numbers (`129.95`); both land here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// A decimal price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Price {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Price {
    /// Create a new price from cents.
    pub const fn from_cents(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Parse a plain decimal string such as `"49.99"`, `"89"` or `"12.5"`.
    ///
    /// Digits past the second decimal place round half-up.
    ///
    /// ```
    /// use shelf_commerce::money::Price;
    /// assert_eq!(Price::parse("49.99").unwrap().amount_cents, 4999);
    /// assert!(Price::parse("forty").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let invalid = || CommerceError::InvalidPrice(input.to_string());
        let text = input.trim();

        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map_or(0, |d| i64::from(d >= 5));

        whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + round_up))
            .map(Self::from_cents)
            .ok_or_else(invalid)
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{}.{:02}", self.amount_cents / 100, (self.amount_cents % 100).abs())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.display_amount())
    }
}

impl std::str::FromStr for Price {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
