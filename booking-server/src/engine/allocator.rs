//! Seat allocation policies.
//!
//! Allocation only *selects* free seats; it never marks them occupied. The
//! reservation engine commits the selection later, so a caller can preview
//! an allocation and ask again without touching inventory.
//!
//! Policy by tier and variant:
//! - Premium: best seats first (quality, then row, then window/aisle/middle).
//! - Standard bus: uniformly random free seats.
//! - Standard train/flight: GOOD seats where possible, keeping the party in
//!   as few consecutive rows as possible.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::domain::{BookingError, Quality, Seat, SeatIndex, Tier, Transport, Variant};

type Candidate<'a> = (SeatIndex, &'a Seat);

/// Select `count` free seats of `tier` on `transport`.
///
/// # Errors
///
/// - `InvalidInput` if `count` is zero
/// - `InsufficientSeats` if fewer than `count` seats of the tier are free
pub fn allocate(
    transport: &Transport,
    count: usize,
    tier: Tier,
) -> Result<Vec<SeatIndex>, BookingError> {
    allocate_with_rng(transport, count, tier, &mut rand::thread_rng())
}

/// [`allocate`] with an explicit random source for the bus policy.
pub fn allocate_with_rng<R: Rng + ?Sized>(
    transport: &Transport,
    count: usize,
    tier: Tier,
    rng: &mut R,
) -> Result<Vec<SeatIndex>, BookingError> {
    if count == 0 {
        return Err(BookingError::invalid("passenger count must be at least 1"));
    }

    let free: Vec<Candidate<'_>> = transport.free_seats(tier).collect();
    if free.len() < count {
        return Err(BookingError::InsufficientSeats {
            requested: count,
            available: free.len(),
            tier,
        });
    }

    let chosen = match (tier, transport.variant()) {
        (Tier::Premium, _) => best_first(free, count),
        (Tier::Standard, Variant::Bus) => random(&free, count, rng),
        (Tier::Standard, Variant::Train | Variant::Flight) => clustered_good(free, count),
    };

    debug!(
        transport = transport.id(),
        %tier,
        count,
        "allocated seats"
    );

    Ok(chosen)
}

/// Sort by preference and take the first `count`.
fn best_first(mut pool: Vec<Candidate<'_>>, count: usize) -> Vec<SeatIndex> {
    pool.sort_by_key(|(_, seat)| seat.preference_key());
    pool.into_iter().take(count).map(|(i, _)| i).collect()
}

fn random<R: Rng + ?Sized>(pool: &[Candidate<'_>], count: usize, rng: &mut R) -> Vec<SeatIndex> {
    pool.choose_multiple(rng, count).map(|(i, _)| *i).collect()
}

/// GOOD seats if there are enough of them, otherwise any free seat; filled
/// row by row so the party sits together.
fn clustered_good(free: Vec<Candidate<'_>>, count: usize) -> Vec<SeatIndex> {
    let good: Vec<Candidate<'_>> = free
        .iter()
        .copied()
        .filter(|(_, s)| s.quality() == Quality::Good)
        .collect();
    let pool = if good.len() >= count { good } else { free };

    let clustered = fill_by_row(&pool, count);
    if clustered.len() >= count {
        return clustered;
    }

    best_first(pool, count)
}

/// Walk rows in ascending order, taking each row's seats in layout order,
/// until `count` seats are collected.
fn fill_by_row(pool: &[Candidate<'_>], count: usize) -> Vec<SeatIndex> {
    let mut by_row: BTreeMap<u16, Vec<SeatIndex>> = BTreeMap::new();
    for (i, seat) in pool {
        by_row.entry(seat.row()).or_default().push(*i);
    }

    by_row.into_values().flatten().take(count).collect()
}

/// Resolve seat codes picked by a passenger.
///
/// Nothing is occupied here; the selection is committed (and re-checked)
/// by the reservation engine.
///
/// # Errors
///
/// - `InvalidInput` for an empty selection, an unknown or repeated code, or
///   a seat in a different tier
/// - `SeatsNoLongerAvailable` listing every chosen seat that is occupied
pub fn select_manual<S: AsRef<str>>(
    transport: &Transport,
    codes: &[S],
    tier: Tier,
) -> Result<Vec<SeatIndex>, BookingError> {
    if codes.is_empty() {
        return Err(BookingError::invalid("no seats selected"));
    }

    let mut chosen = Vec::with_capacity(codes.len());
    let mut seen = HashSet::new();
    let mut taken = Vec::new();

    for code in codes {
        let code = code.as_ref();
        let (index, seat) = transport
            .seat_by_code(code)
            .ok_or_else(|| BookingError::invalid(format!("unknown seat {code:?}")))?;

        if seat.tier() != tier {
            return Err(BookingError::invalid(format!(
                "seat {} is not a {tier} seat",
                seat.code()
            )));
        }
        if !seen.insert(index) {
            return Err(BookingError::invalid(format!(
                "seat {} selected more than once",
                seat.code()
            )));
        }
        if seat.is_occupied() {
            taken.push(seat.code().to_string());
        }
        chosen.push(index);
    }

    if !taken.is_empty() {
        return Err(BookingError::SeatsNoLongerAvailable { seats: taken });
    }

    Ok(chosen)
}
