//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Booking, Seat, Tier, Transport};

/// Query for trips between two cities.
#[derive(Debug, Deserialize)]
pub struct SearchTripsRequest {
    /// Departure city
    pub from: String,

    /// Arrival city
    pub to: String,

    /// Travel date in YYYY-MM-DD format
    pub date: String,
}

/// Trips found by a search.
#[derive(Debug, Serialize)]
pub struct SearchTripsResponse {
    pub trips: Vec<TripSummary>,

    /// Set when nothing ran on the requested date and these trips are this
    /// many days away from it.
    pub widened_by_days: Option<u64>,
}

/// One transport as shown in listings.
#[derive(Debug, Serialize)]
pub struct TripSummary {
    pub id: String,

    /// "TRAIN", "BUS" or "FLIGHT"
    pub variant: String,

    /// Carrier or service description (e.g. "ICE", "FlixBus")
    pub carrier: String,

    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,

    /// Travel time (e.g. "4h 30m")
    pub duration: String,

    pub standard_price: String,
    pub premium_price: String,
    pub standard_available: usize,
    pub premium_available: usize,
    pub total_seats: usize,
}

/// Query for a seat map.
#[derive(Debug, Deserialize)]
pub struct SeatMapRequest {
    /// Restrict to "premium" or "standard"
    pub tier: Option<String>,
}

/// Seat map of one transport, row by row.
#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub transport_id: String,
    pub rows: Vec<SeatRowView>,
}

/// A row of seats.
#[derive(Debug, Serialize)]
pub struct SeatRowView {
    pub row: u16,
    pub tier: String,
    pub quality: String,
    pub seats: Vec<SeatView>,
}

#[derive(Debug, Serialize)]
pub struct SeatView {
    pub code: String,
    pub position: String,
    pub quality: String,
    pub occupied: bool,
}

/// Request to preview an automatic seat allocation.
#[derive(Debug, Deserialize)]
pub struct AllocationRequest {
    pub count: usize,
    pub tier: String,
}

/// Seats the allocator would pick. Nothing is reserved.
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub transport_id: String,
    pub tier: String,
    pub seats: Vec<String>,
}

/// Request to book seats.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub transport_id: String,
    pub passenger_name: String,
    pub passenger_count: usize,
    pub tier: String,

    /// Seat codes chosen by the passenger. When absent, seats are assigned
    /// automatically.
    pub seats: Option<Vec<String>>,
}

/// A booking as returned to clients.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub id: String,
    pub transport: TripSummary,
    pub passenger_name: String,
    pub passenger_count: usize,
    pub tier: String,
    pub tier_label: String,
    pub seats: Vec<String>,
    pub base_fare: String,
    pub add_on_fees: String,
    pub total_price: String,

    /// Total in euro cents
    pub total_cents: u64,

    /// Booking time (YYYY-MM-DD HH:MM:SS)
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingView>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Conversion implementations

impl TripSummary {
    pub fn from_transport(transport: &Transport) -> Self {
        let (hours, minutes) = transport.duration_hm();
        Self {
            id: transport.id().to_string(),
            variant: transport.variant().as_str().to_string(),
            carrier: transport.extra_info().to_string(),
            departure: transport.departure().to_string(),
            arrival: transport.arrival().to_string(),
            date: transport.date().format("%Y-%m-%d").to_string(),
            departure_time: transport.departure_time().format("%H:%M").to_string(),
            arrival_time: transport.arrival_time().format("%H:%M").to_string(),
            duration: format!("{hours}h {minutes}m"),
            standard_price: transport.price(Tier::Standard).to_string(),
            premium_price: transport.price(Tier::Premium).to_string(),
            standard_available: transport.available_count(Tier::Standard),
            premium_available: transport.available_count(Tier::Premium),
            total_seats: transport.capacity(),
        }
    }
}

impl SeatView {
    fn from_seat(seat: &Seat) -> Self {
        Self {
            code: seat.code().to_string(),
            position: seat.position().as_str().to_string(),
            quality: seat.quality().as_str().to_string(),
            occupied: seat.is_occupied(),
        }
    }
}

impl SeatMapResponse {
    /// Group the seats by row, optionally keeping only one tier.
    pub fn from_transport(transport: &Transport, tier: Option<Tier>) -> Self {
        let mut rows: Vec<SeatRowView> = Vec::new();

        for seat in transport
            .seats()
            .iter()
            .filter(|s| tier.is_none_or(|t| s.tier() == t))
        {
            match rows.last_mut() {
                Some(row) if row.row == seat.row() => row.seats.push(SeatView::from_seat(seat)),
                _ => rows.push(SeatRowView {
                    row: seat.row(),
                    tier: seat.tier().as_str().to_string(),
                    quality: seat.quality().as_str().to_string(),
                    seats: vec![SeatView::from_seat(seat)],
                }),
            }
        }

        Self {
            transport_id: transport.id().to_string(),
            rows,
        }
    }
}

impl BookingView {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            id: booking.id().to_string(),
            transport: TripSummary::from_transport(booking.transport()),
            passenger_name: booking.customer_name().to_string(),
            passenger_count: booking.passenger_count(),
            tier: booking.tier().as_str().to_string(),
            tier_label: booking.tier().label().to_string(),
            seats: booking.seat_codes(),
            base_fare: booking.base_fare().to_string(),
            add_on_fees: booking.add_on_fees().to_string(),
            total_price: booking.total_price().to_string(),
            total_cents: booking.total_price().cents(),
            created_at: booking.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
