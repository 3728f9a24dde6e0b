//! Booking configuration.

/// Largest party accepted by default.
pub const DEFAULT_MAX_PARTY_SIZE: usize = 10;

/// Limits applied to every reservation.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Maximum passengers in one booking.
    pub max_party_size: usize,
}

impl BookingConfig {
    /// Create a configuration. A party size of zero is raised to one.
    pub fn new(max_party_size: usize) -> Self {
        Self {
            max_party_size: max_party_size.max(1),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARTY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        assert_eq!(BookingConfig::default().max_party_size, 10);
        assert_eq!(BookingConfig::new(0).max_party_size, 1);
        assert_eq!(BookingConfig::new(4).max_party_size, 4);
    }
}
