//! Random pre-occupancy of freshly loaded transports.

use rand::Rng;
use rand::seq::index;

use crate::domain::Transport;

/// Mark a random share of the transport's seats as occupied.
///
/// The share is drawn uniformly from `min..=max` and applied to the whole
/// seat map; which seats are taken is uniform too. Returns how many seats
/// were newly occupied.
pub fn pre_occupy<R: Rng + ?Sized>(transport: &Transport, min: f64, max: f64, rng: &mut R) -> usize {
    let seats = transport.seats();
    if seats.is_empty() || max <= 0.0 {
        return 0;
    }

    let rate = if min < max {
        rng.gen_range(min..=max)
    } else {
        max
    };
    let count = ((seats.len() as f64) * rate).round() as usize;

    index::sample(rng, seats.len(), count.min(seats.len()))
        .into_iter()
        .filter(|&i| seats[i].try_occupy())
        .count()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::domain::Variant;
    use crate::test_support::transport;

    #[test]
    fn fixed_rate_occupies_exact_share() {
        let t = transport(Variant::Bus);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(pre_occupy(&t, 0.5, 0.5, &mut rng), 25);
        assert_eq!(t.total_available(), 25);
    }

    #[test]
    fn zero_rate_is_noop() {
        let t = transport(Variant::Flight);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(pre_occupy(&t, 0.0, 0.0, &mut rng), 0);
        assert_eq!(t.total_available(), 180);
    }

    #[test]
    fn already_occupied_seats_not_counted() {
        let t = transport(Variant::Bus);
        let mut rng = StdRng::seed_from_u64(3);

        pre_occupy(&t, 1.0, 1.0, &mut rng);
        assert_eq!(pre_occupy(&t, 1.0, 1.0, &mut rng), 0);
        assert_eq!(t.total_available(), 0);
    }

    #[test]
    fn rate_drawn_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let t = transport(Variant::Train);
            let occupied = pre_occupy(&t, 0.20, 0.40, &mut rng);
            assert!((40..=80).contains(&occupied), "{occupied}");
        }
    }
}
