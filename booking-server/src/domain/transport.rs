//! Transport types.
//!
//! A `Transport` is one scheduled trip (a train, bus or flight on a given
//! date) together with the seats it owns. The seat map is built once in the
//! constructor from the variant's fixed layout.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};

use super::layout::build_seats;
use super::price::Price;
use super::seat::{Seat, SeatIndex, Tier};

/// Error returned when parsing an unknown variant tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport type: {0:?}")]
pub struct InvalidVariant(String);

/// The kind of transport. Each variant has a fixed seat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Train,
    Bus,
    Flight,
}

impl Variant {
    /// All variants, in search fan-out order.
    pub const ALL: [Variant; 3] = [Variant::Train, Variant::Bus, Variant::Flight];

    /// Parse a variant tag, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_server::domain::Variant;
    ///
    /// assert_eq!(Variant::parse("TRAIN").unwrap(), Variant::Train);
    /// assert_eq!(Variant::parse("flight").unwrap(), Variant::Flight);
    /// assert!(Variant::parse("FERRY").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidVariant> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRAIN" => Ok(Variant::Train),
            "BUS" => Ok(Variant::Bus),
            "FLIGHT" => Ok(Variant::Flight),
            _ => Err(InvalidVariant(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Train => "TRAIN",
            Variant::Bus => "BUS",
            Variant::Flight => "FLIGHT",
        }
    }

    /// Number of seats in this variant's seat map.
    pub fn capacity(&self) -> usize {
        match self {
            Variant::Train => 200,
            Variant::Bus => 50,
            Variant::Flight => 180,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route, schedule and fare data for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportDetails {
    /// Operator-assigned identifier (e.g. "ICE-501")
    pub id: String,
    pub departure: String,
    pub arrival: String,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub standard_price: Price,
    pub premium_price: Price,
    /// Carrier, train class or other free-text info
    pub extra_info: String,
}

/// A scheduled trip and its seats.
///
/// Transports are shared behind `Arc` between the searcher, the reservation
/// engine and bookings. Seat occupancy is the only thing that changes after
/// construction, and it changes through each seat's own atomic flag.
#[derive(Debug)]
pub struct Transport {
    variant: Variant,
    details: TransportDetails,
    seats: Vec<Seat>,
}

impl Transport {
    /// Create a transport with every seat free.
    pub fn new(variant: Variant, details: TransportDetails) -> Self {
        Self {
            variant,
            details,
            seats: build_seats(variant),
        }
    }

    /// Create a transport with a hand-built seat map.
    #[cfg(test)]
    pub(crate) fn with_seats(variant: Variant, details: TransportDetails, seats: Vec<Seat>) -> Self {
        Self {
            variant,
            details,
            seats,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn details(&self) -> &TransportDetails {
        &self.details
    }

    pub fn id(&self) -> &str {
        &self.details.id
    }

    pub fn departure(&self) -> &str {
        &self.details.departure
    }

    pub fn arrival(&self) -> &str {
        &self.details.arrival
    }

    pub fn date(&self) -> NaiveDate {
        self.details.date
    }

    pub fn departure_time(&self) -> NaiveTime {
        self.details.departure_time
    }

    pub fn arrival_time(&self) -> NaiveTime {
        self.details.arrival_time
    }

    pub fn extra_info(&self) -> &str {
        &self.details.extra_info
    }

    /// All seats in layout order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index.0)
    }

    /// Find a seat by its code, ignoring case.
    pub fn seat_by_code(&self, code: &str) -> Option<(SeatIndex, &Seat)> {
        let code = code.trim();
        self.seats
            .iter()
            .enumerate()
            .find(|(_, s)| s.code().eq_ignore_ascii_case(code))
            .map(|(i, s)| (SeatIndex(i), s))
    }

    /// Free seats of the given tier, with their indices, in layout order.
    pub fn free_seats(&self, tier: Tier) -> impl Iterator<Item = (SeatIndex, &Seat)> {
        self.seats
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.tier() == tier && !s.is_occupied())
            .map(|(i, s)| (SeatIndex(i), s))
    }

    /// All free seats regardless of tier.
    pub fn available_seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| !s.is_occupied())
    }

    /// Number of free seats of the given tier.
    pub fn available_count(&self, tier: Tier) -> usize {
        self.free_seats(tier).count()
    }

    /// Number of free seats of either tier.
    pub fn total_available(&self) -> usize {
        self.available_seats().count()
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    /// Per-passenger fare for a tier.
    pub fn price(&self, tier: Tier) -> Price {
        match tier {
            Tier::Premium => self.details.premium_price,
            Tier::Standard => self.details.standard_price,
        }
    }

    /// Travel time. An arrival earlier than the departure is an overnight
    /// trip and gets 24 hours added.
    pub fn duration(&self) -> Duration {
        let d = self.details.arrival_time - self.details.departure_time;
        if d < Duration::zero() {
            d + Duration::hours(24)
        } else {
            d
        }
    }

    /// Travel time split into whole hours and remaining minutes.
    pub fn duration_hm(&self) -> (i64, i64) {
        let d = self.duration();
        (d.num_hours(), d.num_minutes() % 60)
    }

    /// Display label such as "TRAIN (ICE)".
    pub fn display_type(&self) -> String {
        format!("{} ({})", self.variant, self.details.extra_info)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.duration_hm();
        write!(
            f,
            "{} | {} → {} | {} {}-{} ({}h {}m) | {}/{} | {}/{} seats",
            self.display_type(),
            self.departure(),
            self.arrival(),
            self.date(),
            self.departure_time().format("%H:%M"),
            self.arrival_time().format("%H:%M"),
            h,
            m,
            self.details.standard_price,
            self.details.premium_price,
            self.total_available(),
            self.capacity(),
        )
    }
}
