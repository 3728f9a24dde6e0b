//! Search configuration for the trip searcher.

/// Configuration parameters for trip search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of per-variant scans running at once.
    pub workers: usize,

    /// How many days either side of the requested date to try when the
    /// exact date has no trips.
    pub widen_days: u64,
}

impl SearchConfig {
    /// Create a new configuration. A worker count of zero is raised to one.
    pub fn new(workers: usize, widen_days: u64) -> Self {
        Self {
            workers: workers.max(1),
            widen_days,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 3, // one per variant
            widen_days: 14,
        }
    }
}
