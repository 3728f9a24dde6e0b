//! Fare amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Error returned when parsing an invalid price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price: {reason}")]
pub struct InvalidPrice {
    reason: &'static str,
}

impl InvalidPrice {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A non-negative amount of money in euro cents.
///
/// # Examples
///
/// ```
/// use booking_server::domain::Price;
///
/// let fare = Price::parse("49.9").unwrap();
/// assert_eq!(fare.cents(), 4990);
/// assert_eq!(fare.to_string(), "€49.90");
/// assert_eq!((fare * 2).to_string(), "€99.80");
///
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("1.234").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    /// Parse a decimal amount with at most two fractional digits.
    pub fn parse(s: &str) -> Result<Self, InvalidPrice> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidPrice::new("empty"));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPrice::new("expected digits before the decimal point"));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPrice::new("expected digits after the decimal point"));
        }
        if frac.len() > 2 {
            return Err(InvalidPrice::new("more than two decimal places"));
        }

        let whole: u64 = whole
            .parse()
            .map_err(|_| InvalidPrice::new("amount too large"))?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().unwrap_or(0) * 10,
            _ => frac.parse::<u64>().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Price)
            .ok_or_else(|| InvalidPrice::new("amount too large"))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Mul<usize> for Price {
    type Output = Price;

    fn mul(self, rhs: usize) -> Price {
        Price(self.0.saturating_mul(rhs as u64))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "€{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
