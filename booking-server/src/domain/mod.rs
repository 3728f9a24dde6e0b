//! Domain types for the seat inventory.
//!
//! Transports own their seats; bookings reference a transport and a set of
//! seat indices. Value types (`Price`, `Tier`, `Variant`) are validated at
//! construction so code receiving them can trust them.

mod booking;
mod error;
mod layout;
mod price;
mod seat;
mod transport;

pub use booking::{Booking, BookingId};
pub use error::BookingError;
pub use price::{InvalidPrice, Price};
pub use seat::{InvalidTier, Position, Quality, Seat, SeatIndex, Tier};
pub use transport::{InvalidVariant, Transport, TransportDetails, Variant};
