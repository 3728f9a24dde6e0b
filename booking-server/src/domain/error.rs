//! Booking error types.
//!
//! Every condition here is recoverable and user-facing; none of them leaves
//! seat state changed.

use super::{BookingId, Tier};

/// Errors from seat allocation, reservation and the booking ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Malformed or inconsistent request
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fewer free seats of the tier than requested
    #[error("not enough {tier} seats: requested {requested}, available {available}")]
    InsufficientSeats {
        requested: usize,
        available: usize,
        tier: Tier,
    },

    /// A chosen seat was taken before the reservation committed
    #[error("seats no longer available: {}", seats.join(", "))]
    SeatsNoLongerAvailable { seats: Vec<String> },

    /// No active booking with this id
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),
}

impl BookingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BookingError::InvalidInput(message.into())
    }
}
