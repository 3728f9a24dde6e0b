//! Trip search across the transport inventory.
//!
//! Answers "what can take me from A to B on this date?", falling back to the
//! nearest date with availability when the requested date has none.

mod config;
mod searcher;

pub use config::SearchConfig;
pub use searcher::{SearchError, SearchResult, TripSearcher};
