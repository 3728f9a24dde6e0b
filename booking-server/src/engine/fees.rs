//! Add-on fees charged on top of the fare.

use crate::domain::{Price, Tier, Variant};

/// Per-passenger charge for choosing seats on standard train and flight
/// tickets (€5.00).
pub const SEAT_SELECTION_FEE: Price = Price::from_cents(500);

/// How the seats for a booking were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatChoice {
    /// Picked by the allocator
    Auto,
    /// Picked by the passenger
    Manual,
}

/// Per-passenger fee for a seat choice, or zero when it is included.
///
/// Bus tickets and premium tickets always include seat selection.
pub fn seat_selection_fee(variant: Variant, tier: Tier, choice: SeatChoice) -> Price {
    match (choice, tier, variant) {
        (SeatChoice::Manual, Tier::Standard, Variant::Train | Variant::Flight) => {
            SEAT_SELECTION_FEE
        }
        _ => Price::ZERO,
    }
}

/// Total add-on fees for a party.
pub fn add_on_fees(variant: Variant, tier: Tier, choice: SeatChoice, passengers: usize) -> Price {
    seat_selection_fee(variant, tier, choice) * passengers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_standard_train_and_flight_pay() {
        for variant in [Variant::Train, Variant::Flight] {
            assert_eq!(
                seat_selection_fee(variant, Tier::Standard, SeatChoice::Manual).cents(),
                500
            );
        }
        assert_eq!(
            add_on_fees(Variant::Train, Tier::Standard, SeatChoice::Manual, 3).cents(),
            1500
        );
    }

    #[test]
    fn included_cases_are_free() {
        assert_eq!(
            seat_selection_fee(Variant::Bus, Tier::Standard, SeatChoice::Manual),
            Price::ZERO
        );
        for variant in Variant::ALL {
            assert_eq!(
                seat_selection_fee(variant, Tier::Premium, SeatChoice::Manual),
                Price::ZERO
            );
            for tier in [Tier::Premium, Tier::Standard] {
                assert_eq!(
                    add_on_fees(variant, tier, SeatChoice::Auto, 4),
                    Price::ZERO
                );
            }
        }
    }
}
