//! Seat types.
//!
//! A `Seat` is a single unit of inventory. Everything about it except its
//! occupancy is fixed when the owning transport builds its seat map; the
//! occupied flag is the only state that changes, and it is only ever changed
//! through an atomic compare-and-swap.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Error returned when parsing an unknown class tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tier: {0:?} (expected premium or standard)")]
pub struct InvalidTier(String);

/// Seating class, each with its own price and seat subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Premium,
    Standard,
}

impl Tier {
    /// Parse a tier name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::Tier;
    ///
    /// assert_eq!(Tier::parse("Premium").unwrap(), Tier::Premium);
    /// assert_eq!(Tier::parse("standard").unwrap(), Tier::Standard);
    /// assert!(Tier::parse("business").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidTier> {
        match s.trim().to_ascii_lowercase().as_str() {
            "premium" => Ok(Tier::Premium),
            "standard" => Ok(Tier::Standard),
            _ => Err(InvalidTier(s.to_string())),
        }
    }

    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Premium => "premium",
            Tier::Standard => "standard",
        }
    }

    /// Human-readable class label.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Premium => "Premium/1st Class",
            Tier::Standard => "Standard/2nd Class",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desirability of a seat, independent of tier.
///
/// Variants are declared best-first so the derived `Ord` ranks
/// `Excellent < Good < Average < Poor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Excellent => "EXCELLENT",
            Quality::Good => "GOOD",
            Quality::Average => "AVERAGE",
            Quality::Poor => "POOR",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lateral position of a seat within its row.
///
/// Declared in preference order: window, then aisle, then middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Window,
    Aisle,
    Middle,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Window => "WINDOW",
            Position::Aisle => "AISLE",
            Position::Middle => "MIDDLE",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a seat within its transport's seat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatIndex(pub usize);

/// A single seat.
///
/// # Invariants
///
/// - `code`, `row`, `position`, `tier` and `quality` never change.
/// - `occupied` only changes via [`Seat::try_occupy`] and [`Seat::release`].
#[derive(Debug)]
pub struct Seat {
    code: String,
    row: u16,
    position: Position,
    tier: Tier,
    quality: Quality,
    occupied: AtomicBool,
}

impl Seat {
    /// Create a free seat.
    pub fn new(code: String, row: u16, position: Position, tier: Tier, quality: Quality) -> Self {
        Self {
            code,
            row,
            position,
            tier,
            quality,
            occupied: AtomicBool::new(false),
        }
    }

    /// Mark the seat occupied if it is free.
    ///
    /// Returns `true` if this call made the transition. When several callers
    /// race on the same free seat exactly one of them sees `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::{Position, Quality, Seat, Tier};
    ///
    /// let seat = Seat::new("1A".into(), 1, Position::Window, Tier::Premium, Quality::Excellent);
    /// assert!(seat.try_occupy());
    /// assert!(!seat.try_occupy());
    /// seat.release();
    /// assert!(!seat.is_occupied());
    /// ```
    pub fn try_occupy(&self) -> bool {
        self.occupied
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Mark the seat free. Releasing a free seat does nothing.
    pub fn release(&self) {
        self.occupied.store(false, Ordering::Release);
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Seat letter without the row number (e.g. "C" for "12C").
    pub fn letter(&self) -> &str {
        self.code.trim_start_matches(|c: char| c.is_ascii_digit())
    }

    /// Sort key preferring better quality, then lower rows, then
    /// window over aisle over middle.
    pub fn preference_key(&self) -> (Quality, u16, Position) {
        (self.quality, self.row, self.position)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_occupied() { "X" } else { " " };
        write!(f, "{}[{}]", self.code, mark)
    }
}
