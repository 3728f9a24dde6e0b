//! Seat allocation and reservation.
//!
//! The allocator picks seats without side effects; the reservation engine
//! commits a pick into a booking using per-seat atomics; the ledger keeps
//! the active bookings so each one is cancelled at most once.

mod allocator;
mod config;
mod fees;
mod ledger;
mod reservation;

pub use allocator::{allocate, allocate_with_rng, select_manual};
pub use config::{BookingConfig, DEFAULT_MAX_PARTY_SIZE};
pub use fees::{SEAT_SELECTION_FEE, SeatChoice, add_on_fees, seat_selection_fee};
pub use ledger::BookingLedger;
pub use reservation::{ReservationEngine, ReservationRequest, ValidatedReservation};
