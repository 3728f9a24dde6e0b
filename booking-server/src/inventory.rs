//! The loaded transport collection.

use std::sync::Arc;

use crate::domain::{Tier, Transport};

/// Every transport known to the engine.
///
/// The collection itself is fixed after loading; only seat occupancy inside
/// each transport changes.
#[derive(Debug, Default)]
pub struct Inventory {
    transports: Vec<Arc<Transport>>,
}

impl Inventory {
    pub fn new(transports: Vec<Transport>) -> Self {
        Self {
            transports: transports.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn transports(&self) -> &[Arc<Transport>] {
        &self.transports
    }

    /// Find a transport by id. The first match wins if ids repeat.
    pub fn get(&self, id: &str) -> Option<Arc<Transport>> {
        self.transports.iter().find(|t| t.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.transports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Total seats across all transports.
    pub fn capacity(&self) -> usize {
        self.transports.iter().map(|t| t.capacity()).sum()
    }

    /// Free seats of a tier across all transports.
    pub fn available(&self, tier: Tier) -> usize {
        self.transports.iter().map(|t| t.available_count(tier)).sum()
    }
}

impl FromIterator<Transport> for Inventory {
    fn from_iter<I: IntoIterator<Item = Transport>>(iter: I) -> Self {
        Inventory::new(iter.into_iter().collect())
    }
}
