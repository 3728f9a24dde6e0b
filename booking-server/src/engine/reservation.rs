//! Reservation engine.
//!
//! Turns a seat selection into a [`Booking`]. An attempt moves through
//! `REQUESTED → VALIDATED → COMMITTED`, or is rejected on the way:
//!
//! 1. [`ReservationEngine::validate`] checks the request is well formed and
//!    that every seat is still free, producing a [`ValidatedReservation`].
//! 2. [`ValidatedReservation::commit`] occupies each seat with an atomic
//!    compare-and-swap. If any seat was taken in the meantime, the seats
//!    already occupied by this attempt are released again before the error
//!    is returned, so a partial booking is never observable.
//!
//! There is no transport-wide lock; per-seat atomics are enough to guarantee
//! that at most one active booking references any seat.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Booking, BookingError, Price, Seat, SeatIndex, Tier, Transport};

use super::config::BookingConfig;

/// A request to reserve specific seats.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub transport: Arc<Transport>,
    pub seats: Vec<SeatIndex>,
    pub passenger_name: String,
    pub passenger_count: usize,
    pub tier: Tier,
    /// Fees computed by the caller (e.g. seat selection), for the whole party.
    pub add_on_fees: Price,
}

impl ReservationRequest {
    /// Create a request with no add-on fees.
    pub fn new(
        transport: Arc<Transport>,
        seats: Vec<SeatIndex>,
        passenger_name: impl Into<String>,
        passenger_count: usize,
        tier: Tier,
    ) -> Self {
        Self {
            transport,
            seats,
            passenger_name: passenger_name.into(),
            passenger_count,
            tier,
            add_on_fees: Price::ZERO,
        }
    }

    /// Set the add-on fees for the whole party.
    pub fn with_add_on_fees(mut self, fees: Price) -> Self {
        self.add_on_fees = fees;
        self
    }
}

/// A request whose seats were all free at validation time.
///
/// Seats may still be taken by a concurrent caller before [`commit`] runs;
/// `commit` detects that and rolls back.
///
/// [`commit`]: ValidatedReservation::commit
#[derive(Debug)]
#[must_use = "a validated reservation does nothing until committed"]
pub struct ValidatedReservation {
    transport: Arc<Transport>,
    seats: Vec<SeatIndex>,
    passenger_name: String,
    tier: Tier,
    add_on_fees: Price,
}

impl ValidatedReservation {
    /// Occupy every seat and build the booking.
    ///
    /// # Errors
    ///
    /// `SeatsNoLongerAvailable` if any seat was lost to a concurrent
    /// reservation. In that case no seat is left occupied by this attempt.
    pub fn commit(self) -> Result<Booking, BookingError> {
        occupy_all(&self.transport, &self.seats)?;

        let booking = Booking::new(
            self.transport,
            self.seats,
            self.passenger_name,
            self.tier,
            self.add_on_fees,
        );

        info!(
            booking = %booking.id(),
            transport = booking.transport().id(),
            seats = ?booking.seat_codes(),
            total = %booking.total_price(),
            "reservation committed"
        );

        Ok(booking)
    }
}

/// Occupies seats for bookings and releases them on cancellation.
#[derive(Debug, Clone, Default)]
pub struct ReservationEngine {
    config: BookingConfig,
}

impl ReservationEngine {
    /// Engine with the default party size limit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BookingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Check the passenger name and party size before any seat is chosen.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name, or a party of zero or more than
    /// `max_party_size` passengers.
    pub fn check_party(&self, passenger_name: &str, passenger_count: usize) -> Result<(), BookingError> {
        if passenger_name.trim().is_empty() {
            return Err(BookingError::invalid("passenger name is empty"));
        }
        if passenger_count == 0 {
            return Err(BookingError::invalid("passenger count must be at least 1"));
        }
        let max = self.config.max_party_size;
        if passenger_count > max {
            return Err(BookingError::invalid(format!(
                "at most {max} passengers per booking, got {passenger_count}"
            )));
        }
        Ok(())
    }

    /// Validate and commit in one step.
    pub fn reserve(&self, request: ReservationRequest) -> Result<Booking, BookingError> {
        self.validate(request)?.commit()
    }

    /// Check a request without changing any seat.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank name, a zero, oversized or mismatched
    ///   passenger count, a repeated seat, a seat not on the transport, or a seat of
    ///   another tier
    /// - `SeatsNoLongerAvailable` listing the seats already occupied
    pub fn validate(
        &self,
        request: ReservationRequest,
    ) -> Result<ValidatedReservation, BookingError> {
        let ReservationRequest {
            transport,
            seats,
            passenger_name,
            passenger_count,
            tier,
            add_on_fees,
        } = request;

        self.check_party(&passenger_name, passenger_count)?;
        let passenger_name = passenger_name.trim().to_string();
        if seats.len() != passenger_count {
            return Err(BookingError::invalid(format!(
                "{} seats given for {} passengers",
                seats.len(),
                passenger_count
            )));
        }

        let resolved = resolve(&transport, &seats, tier)?;

        let taken: Vec<String> = resolved
            .iter()
            .filter(|s| s.is_occupied())
            .map(|s| s.code().to_string())
            .collect();
        if !taken.is_empty() {
            debug!(
                transport = transport.id(),
                seats = ?taken,
                "reservation rejected at validation"
            );
            return Err(BookingError::SeatsNoLongerAvailable { seats: taken });
        }

        Ok(ValidatedReservation {
            transport,
            seats,
            passenger_name,
            tier,
            add_on_fees,
        })
    }

    /// Release every seat of a booking.
    ///
    /// The engine does not track which bookings are active; removing the
    /// booking from the active set is the caller's job (see `BookingLedger`).
    pub fn cancel(&self, booking: &Booking) {
        for seat in booking.seats() {
            seat.release();
        }

        info!(
            booking = %booking.id(),
            transport = booking.transport().id(),
            seats = ?booking.seat_codes(),
            "reservation cancelled"
        );
    }
}

/// Look up each seat, checking it exists, is in the requested tier and is
/// not repeated.
fn resolve<'a>(
    transport: &'a Transport,
    seats: &[SeatIndex],
    tier: Tier,
) -> Result<Vec<&'a Seat>, BookingError> {
    let mut seen = HashSet::with_capacity(seats.len());

    seats
        .iter()
        .map(|&index| {
            let seat = transport.seat(index).ok_or_else(|| {
                BookingError::invalid(format!(
                    "seat index {} is not on transport {}",
                    index.0,
                    transport.id()
                ))
            })?;
            if seat.tier() != tier {
                return Err(BookingError::invalid(format!(
                    "seat {} is not a {tier} seat",
                    seat.code()
                )));
            }
            if !seen.insert(index) {
                return Err(BookingError::invalid(format!(
                    "seat {} requested more than once",
                    seat.code()
                )));
            }
            Ok(seat)
        })
        .collect()
}

/// Occupy all seats or none.
fn occupy_all(transport: &Transport, seats: &[SeatIndex]) -> Result<(), BookingError> {
    let mut occupied: Vec<&Seat> = Vec::with_capacity(seats.len());

    for &index in seats {
        let Some(seat) = transport.seat(index) else {
            rollback(&occupied);
            return Err(BookingError::invalid(format!(
                "seat index {} is not on transport {}",
                index.0,
                transport.id()
            )));
        };

        if !seat.try_occupy() {
            rollback(&occupied);
            debug!(
                transport = transport.id(),
                seat = seat.code(),
                released = occupied.len(),
                "lost seat race, rolled back"
            );
            return Err(BookingError::SeatsNoLongerAvailable {
                seats: vec![seat.code().to_string()],
            });
        }
        occupied.push(seat);
    }

    Ok(())
}

fn rollback(occupied: &[&Seat]) {
    for seat in occupied {
        seat.release();
    }
}
