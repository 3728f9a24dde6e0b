//! Fixed seat maps for each transport variant.
//!
//! Each layout is a list of sections. A section covers a contiguous block of
//! rows that share a tier, a quality and a set of columns. Seats are produced
//! row by row, in column order, so seat indices follow the physical layout.

use std::ops::RangeInclusive;

use super::seat::{Position, Quality, Seat, Tier};
use super::transport::Variant;

use Position::{Aisle, Middle, Window};

/// A block of identical rows.
struct Section {
    rows: RangeInclusive<u16>,
    tier: Tier,
    quality: Quality,
    columns: &'static [(char, Position)],
}

const BUS_ROW: &[(char, Position)] = &[('A', Window), ('B', Aisle), ('C', Aisle), ('D', Window)];
const BUS_BACK_ROW: &[(char, Position)] = &[('A', Window), ('D', Window)];

const BUS: &[Section] = &[
    Section {
        rows: 1..=3,
        tier: Tier::Premium,
        quality: Quality::Excellent,
        columns: BUS_ROW,
    },
    Section {
        rows: 4..=12,
        tier: Tier::Standard,
        quality: Quality::Average,
        columns: BUS_ROW,
    },
    // Last row next to the toilet.
    Section {
        rows: 13..=13,
        tier: Tier::Standard,
        quality: Quality::Poor,
        columns: BUS_BACK_ROW,
    },
];

const TRAIN_FIRST: &[(char, Position)] = &[
    ('A', Window),
    ('B', Aisle),
    ('C', Window),
    ('D', Window),
    ('E', Aisle),
    ('F', Window),
];
const TRAIN_SECOND: &[(char, Position)] = &[
    ('A', Window),
    ('B', Middle),
    ('C', Aisle),
    ('D', Aisle),
    ('E', Middle),
    ('F', Window),
];
const TRAIN_BACK_ROW: &[(char, Position)] = &[('A', Window), ('B', Aisle)];

const TRAIN: &[Section] = &[
    Section {
        rows: 1..=5,
        tier: Tier::Premium,
        quality: Quality::Excellent,
        columns: TRAIN_FIRST,
    },
    Section {
        rows: 6..=15,
        tier: Tier::Standard,
        quality: Quality::Good,
        columns: TRAIN_SECOND,
    },
    Section {
        rows: 16..=28,
        tier: Tier::Standard,
        quality: Quality::Average,
        columns: TRAIN_SECOND,
    },
    Section {
        rows: 29..=33,
        tier: Tier::Standard,
        quality: Quality::Poor,
        columns: TRAIN_SECOND,
    },
    Section {
        rows: 34..=34,
        tier: Tier::Standard,
        quality: Quality::Poor,
        columns: TRAIN_BACK_ROW,
    },
];

// A-C | D-F | G-J, no I.
const FLIGHT_ROW: &[(char, Position)] = &[
    ('A', Window),
    ('B', Middle),
    ('C', Aisle),
    ('D', Aisle),
    ('E', Middle),
    ('F', Aisle),
    ('G', Aisle),
    ('H', Middle),
    ('J', Window),
];

const FLIGHT: &[Section] = &[
    Section {
        rows: 1..=5,
        tier: Tier::Premium,
        quality: Quality::Excellent,
        columns: FLIGHT_ROW,
    },
    Section {
        rows: 6..=15,
        tier: Tier::Standard,
        quality: Quality::Good,
        columns: FLIGHT_ROW,
    },
    Section {
        rows: 16..=20,
        tier: Tier::Standard,
        quality: Quality::Poor,
        columns: FLIGHT_ROW,
    },
];

fn sections(variant: Variant) -> &'static [Section] {
    match variant {
        Variant::Bus => BUS,
        Variant::Train => TRAIN,
        Variant::Flight => FLIGHT,
    }
}

/// Build the free seat map for a variant.
pub(crate) fn build_seats(variant: Variant) -> Vec<Seat> {
    let sections = sections(variant);
    let mut seats = Vec::with_capacity(variant.capacity());

    for section in sections {
        for row in section.rows.clone() {
            for &(letter, position) in section.columns {
                seats.push(Seat::new(
                    format!("{row}{letter}"),
                    row,
                    position,
                    section.tier,
                    section.quality,
                ));
            }
        }
    }

    seats
}
