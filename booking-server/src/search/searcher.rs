//! Trip search.
//!
//! A search runs one scan per transport variant in parallel on the blocking
//! pool, unions the results, and if nothing matched tries nearby dates
//! (future before past at each offset), also on the blocking pool. The final list is sorted by date and
//! departure time; scans themselves give no ordering guarantee.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::domain::{Transport, Variant};
use crate::inventory::Inventory;

use super::config::SearchConfig;

/// Error from trip search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Nothing matched on the date or any nearby date
    #[error("no trips found from {departure} to {arrival} on or near {date}")]
    NoTripsFound {
        departure: String,
        arrival: String,
        date: NaiveDate,
    },

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// A scan worker panicked or was cancelled
    #[error("search worker failed: {0}")]
    WorkerFailed(String),
}

/// Result of trip search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Matching trips, by date then departure time.
    pub trips: Vec<Arc<Transport>>,

    /// Set when the requested date had no trips and these come from a date
    /// this many days away.
    pub widened_by_days: Option<u64>,
}

/// Normalized search criteria.
#[derive(Debug, Clone)]
struct TripQuery {
    departure: String,
    arrival: String,
}

impl TripQuery {
    fn new(departure: &str, arrival: &str) -> Result<Self, SearchError> {
        let departure = departure.trim();
        let arrival = arrival.trim();

        if departure.is_empty() {
            return Err(SearchError::InvalidRequest(
                "departure city is empty".to_string(),
            ));
        }
        if arrival.is_empty() {
            return Err(SearchError::InvalidRequest(
                "arrival city is empty".to_string(),
            ));
        }

        Ok(Self {
            departure: departure.to_lowercase(),
            arrival: arrival.to_lowercase(),
        })
    }

    /// Route and date match, and at least one seat of either tier is free.
    fn matches(&self, transport: &Transport, date: NaiveDate) -> bool {
        transport.date() == date
            && transport.departure().to_lowercase() == self.departure
            && transport.arrival().to_lowercase() == self.arrival
            && transport.available_seats().next().is_some()
    }
}

/// Scan the collection for matches, optionally restricted to one variant.
fn scan(
    transports: &[Arc<Transport>],
    variant: Option<Variant>,
    query: &TripQuery,
    date: NaiveDate,
) -> Vec<Arc<Transport>> {
    transports
        .iter()
        .filter(|t| variant.is_none_or(|v| t.variant() == v))
        .filter(|t| query.matches(t, date))
        .cloned()
        .collect()
}

/// Searches the inventory for trips between two cities.
#[derive(Debug, Clone)]
pub struct TripSearcher {
    inventory: Arc<Inventory>,
    config: SearchConfig,
    workers: Arc<Semaphore>,
}

impl TripSearcher {
    pub fn new(inventory: Arc<Inventory>, config: SearchConfig) -> Self {
        let workers = Arc::new(Semaphore::new(config.workers.max(1)));
        Self {
            inventory,
            config,
            workers,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find trips from `departure` to `arrival` on `date`, or on the nearest
    /// date within the widening window.
    ///
    /// City names are compared case-insensitively. Only trips with at least
    /// one free seat are returned.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a blank city
    /// - `NoTripsFound` if nothing matches within the window
    /// - `WorkerFailed` if a scan task dies
    pub async fn search(
        &self,
        departure: &str,
        arrival: &str,
        date: NaiveDate,
    ) -> Result<SearchResult, SearchError> {
        let query = TripQuery::new(departure, arrival)?;

        let mut trips = self.fan_out(&query, date).await?;
        let mut widened_by_days = None;

        if trips.is_empty() {
            debug!(departure, arrival, %date, "no exact-date trips, widening");
            if let Some((offset, found)) = self.widen(&query, date).await? {
                info!(departure, arrival, %date, offset, found = found.len(), "found trips on nearby date");
                trips = found;
                widened_by_days = Some(offset);
            }
        }

        if trips.is_empty() {
            return Err(SearchError::NoTripsFound {
                departure: departure.trim().to_string(),
                arrival: arrival.trim().to_string(),
                date,
            });
        }

        trips.sort_by_key(|t| (t.date(), t.departure_time()));

        debug!(departure, arrival, %date, trips = trips.len(), "search complete");

        Ok(SearchResult {
            trips,
            widened_by_days,
        })
    }

    /// One blocking scan per variant, bounded by the worker semaphore.
    async fn fan_out(
        &self,
        query: &TripQuery,
        date: NaiveDate,
    ) -> Result<Vec<Arc<Transport>>, SearchError> {
        let scans = Variant::ALL.into_iter().map(|variant| {
            let inventory = Arc::clone(&self.inventory);
            let workers = Arc::clone(&self.workers);
            let query = query.clone();

            async move {
                let _permit = workers
                    .acquire_owned()
                    .await
                    .map_err(|e| SearchError::WorkerFailed(e.to_string()))?;

                tokio::task::spawn_blocking(move || {
                    scan(inventory.transports(), Some(variant), &query, date)
                })
                .await
                .map_err(|e| SearchError::WorkerFailed(format!("{variant} scan: {e}")))
            }
        });

        let mut merged = Vec::new();
        for result in join_all(scans).await {
            merged.extend(result?);
        }

        Ok(merged)
    }

    /// Run the widening scan on the blocking pool under a worker permit.
    async fn widen(
        &self,
        query: &TripQuery,
        date: NaiveDate,
    ) -> Result<Option<(u64, Vec<Arc<Transport>>)>, SearchError> {
        let _permit = Arc::clone(&self.workers)
            .acquire_owned()
            .await
            .map_err(|e| SearchError::WorkerFailed(e.to_string()))?;

        let inventory = Arc::clone(&self.inventory);
        let query = query.clone();
        let widen_days = self.config.widen_days;

        tokio::task::spawn_blocking(move || {
            nearest_date(inventory.transports(), &query, date, widen_days)
        })
        .await
        .map_err(|e| SearchError::WorkerFailed(format!("widening scan: {e}")))
    }
}

/// Try `date + n` then `date - n` for n = 1, 2, ... and return the first
/// offset with any match, across all variants.
fn nearest_date(
    transports: &[Arc<Transport>],
    query: &TripQuery,
    date: NaiveDate,
    widen_days: u64,
) -> Option<(u64, Vec<Arc<Transport>>)> {
    for offset in 1..=widen_days {
        let days = Days::new(offset);
        let found: Vec<_> = [date.checked_add_days(days), date.checked_sub_days(days)]
            .into_iter()
            .flatten()
            .flat_map(|d| scan(transports, None, query, d))
            .collect();

        if !found.is_empty() {
            return Some((offset, found));
        }
    }

    None
}

#[cfg(test)]
#[path = "searcher_tests.rs"]
mod tests;
