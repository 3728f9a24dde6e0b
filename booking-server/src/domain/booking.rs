//! Booking types.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use super::price::Price;
use super::seat::{Seat, SeatIndex, Tier};
use super::transport::Transport;

/// Booking reference of the form `BK-` followed by 8 upper-case hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingId(String);

impl BookingId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        BookingId(format!("BK-{}", uuid[..8].to_ascii_uppercase()))
    }

    /// Wrap an id received from a caller. No validation is done; unknown ids
    /// simply fail to match any booking.
    pub fn from_string(s: impl Into<String>) -> Self {
        BookingId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A committed reservation.
///
/// Only the reservation engine constructs bookings, and only after every
/// seat has been atomically occupied.
///
/// # Invariants
///
/// - `seats.len() == passenger_count`
/// - every seat index is valid for `transport` and has tier `tier`
#[derive(Debug, Clone)]
pub struct Booking {
    id: BookingId,
    transport: Arc<Transport>,
    seats: Vec<SeatIndex>,
    customer_name: String,
    passenger_count: usize,
    tier: Tier,
    base_fare: Price,
    add_on_fees: Price,
    created_at: NaiveDateTime,
}

impl Booking {
    pub(crate) fn new(
        transport: Arc<Transport>,
        seats: Vec<SeatIndex>,
        customer_name: String,
        tier: Tier,
        add_on_fees: Price,
    ) -> Self {
        let passenger_count = seats.len();
        let base_fare = transport.price(tier) * passenger_count;
        Self {
            id: BookingId::generate(),
            transport,
            seats,
            customer_name,
            passenger_count,
            tier,
            base_fare,
            add_on_fees,
            created_at: Local::now().naive_local(),
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub fn seat_indices(&self) -> &[SeatIndex] {
        &self.seats
    }

    /// The booked seats, in the order they were requested.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter_map(|&i| self.transport.seat(i))
    }

    /// Booked seat codes, e.g. `["6A", "6B"]`.
    pub fn seat_codes(&self) -> Vec<String> {
        self.seats().map(|s| s.code().to_string()).collect()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn passenger_count(&self) -> usize {
        self.passenger_count
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Fare for all passengers before add-ons.
    pub fn base_fare(&self) -> Price {
        self.base_fare
    }

    pub fn add_on_fees(&self) -> Price {
        self.add_on_fees
    }

    pub fn total_price(&self) -> Price {
        self.base_fare + self.add_on_fees
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} ({} passenger{}) | {} {} → {} on {} | {} | seats {} | {}",
            self.id,
            self.customer_name,
            self.passenger_count,
            if self.passenger_count == 1 { "" } else { "s" },
            self.transport.display_type(),
            self.transport.departure(),
            self.transport.arrival(),
            self.transport.date(),
            self.tier.label(),
            self.seat_codes().join(", "),
            self.total_price(),
        )
    }
}
