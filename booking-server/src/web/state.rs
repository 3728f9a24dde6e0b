//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::{BookingConfig, BookingLedger, ReservationEngine};
use crate::inventory::Inventory;
use crate::search::{SearchConfig, TripSearcher};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Loaded transports
    pub inventory: Arc<Inventory>,

    /// Trip search over the inventory
    pub searcher: Arc<TripSearcher>,

    /// Seat reservation
    pub engine: ReservationEngine,

    /// Active bookings
    pub ledger: Arc<BookingLedger>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(inventory: Inventory, search: SearchConfig, booking: BookingConfig) -> Self {
        let inventory = Arc::new(inventory);
        let searcher = TripSearcher::new(Arc::clone(&inventory), search);
        Self {
            inventory,
            searcher: Arc::new(searcher),
            engine: ReservationEngine::with_config(booking),
            ledger: Arc::new(BookingLedger::new()),
        }
    }
}
