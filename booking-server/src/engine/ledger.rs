//! Active booking list.

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{Booking, BookingError, BookingId};

use super::reservation::ReservationEngine;

/// The set of active bookings, in the order they were made.
///
/// Cancelling removes the booking from the set *before* its seats are
/// released, so a booking can only ever be cancelled once.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: RwLock<Vec<Booking>>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed booking.
    pub async fn insert(&self, booking: Booking) {
        self.bookings.write().await.push(booking);
    }

    /// All active bookings, oldest first.
    pub async fn list(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    pub async fn get(&self, id: &BookingId) -> Option<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id() == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }

    /// Remove a booking and release its seats.
    ///
    /// # Errors
    ///
    /// `BookingNotFound` if no active booking has this id (including one
    /// that was already cancelled). Nothing is released in that case.
    pub async fn cancel(
        &self,
        id: &BookingId,
        engine: &ReservationEngine,
    ) -> Result<Booking, BookingError> {
        let booking = {
            let mut bookings = self.bookings.write().await;
            let pos = bookings
                .iter()
                .position(|b| b.id() == id)
                .ok_or_else(|| BookingError::BookingNotFound(id.clone()))?;
            bookings.remove(pos)
        };

        engine.cancel(&booking);
        let remaining = self.len().await;
        info!(booking = %id, remaining, "booking removed");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Tier, Variant};
    use crate::engine::{ReservationRequest, allocate};
    use crate::test_support::transport;

    fn book(engine: &ReservationEngine, name: &str) -> Booking {
        let t = transport(Variant::Bus);
        let seats = allocate(&t, 2, Tier::Premium).unwrap();
        engine
            .reserve(ReservationRequest::new(t, seats, name, 2, Tier::Premium))
            .unwrap()
    }

    #[tokio::test]
    async fn insert_and_list_in_order() {
        let engine = ReservationEngine::new();
        let ledger = BookingLedger::new();
        assert!(ledger.is_empty().await);

        let a = book(&engine, "Ada");
        let b = book(&engine, "Grace");
        ledger.insert(a.clone()).await;
        ledger.insert(b.clone()).await;

        let names: Vec<_> = ledger
            .list()
            .await
            .iter()
            .map(|b| b.customer_name().to_string())
            .collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
        assert_eq!(ledger.get(b.id()).await.unwrap().customer_name(), "Grace");
    }

    #[tokio::test]
    async fn cancel_releases_and_removes() {
        let engine = ReservationEngine::new();
        let ledger = BookingLedger::new();
        let booking = book(&engine, "Ada");
        let transport = booking.transport().clone();
        assert_eq!(transport.available_count(Tier::Premium), 10);
        ledger.insert(booking.clone()).await;

        let cancelled = ledger.cancel(booking.id(), &engine).await.unwrap();
        assert_eq!(cancelled.id(), booking.id());
        assert_eq!(transport.available_count(Tier::Premium), 12);
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn cancel_twice_is_not_found() {
        let engine = ReservationEngine::new();
        let ledger = BookingLedger::new();
        let booking = book(&engine, "Ada");
        let transport = booking.transport().clone();
        ledger.insert(booking.clone()).await;
        ledger.cancel(booking.id(), &engine).await.unwrap();

        // Someone else takes the released seats.
        let seats = booking.seat_indices().to_vec();
        let other = engine
            .reserve(ReservationRequest::new(
                transport.clone(),
                seats,
                "Grace",
                2,
                Tier::Premium,
            ))
            .unwrap();

        let err = ledger.cancel(booking.id(), &engine).await.unwrap_err();
        assert_eq!(err, BookingError::BookingNotFound(booking.id().clone()));
        assert!(other.seats().all(|s| s.is_occupied()));
    }

    #[tokio::test]
    async fn cancel_runs_on_spawned_task() {
        let engine = ReservationEngine::new();
        let ledger = Arc::new(BookingLedger::new());
        let booking = book(&engine, "Ada");
        let id = booking.id().clone();
        ledger.insert(booking).await;

        let task = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move { ledger.cancel(&id, &engine).await })
        };

        assert!(task.await.unwrap().is_ok());
        assert!(ledger.is_empty().await);
    }
}
