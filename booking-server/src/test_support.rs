//! Fixtures shared by unit tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{Price, Transport, TransportDetails, Variant};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

pub fn details(id: &str, from: &str, to: &str, on: &str, dep: &str) -> TransportDetails {
    TransportDetails {
        id: id.to_string(),
        departure: from.to_string(),
        arrival: to.to_string(),
        date: date(on),
        departure_time: time(dep),
        arrival_time: time("23:00"),
        standard_price: Price::from_cents(4000),
        premium_price: Price::from_cents(7500),
        extra_info: "Test".to_string(),
    }
}

/// A Berlin → Munich transport on 2025-12-21 at 08:00 with every seat free.
pub fn transport(variant: Variant) -> Arc<Transport> {
    Arc::new(Transport::new(
        variant,
        details("T-1", "Berlin", "Munich", "2025-12-21", "08:00"),
    ))
}

/// Occupy the seats with the given codes.
pub fn occupy(transport: &Transport, codes: &[&str]) {
    for code in codes {
        let (_, seat) = transport.seat_by_code(code).unwrap();
        assert!(seat.try_occupy(), "{code} already occupied");
    }
}

/// Occupy every seat.
pub fn fill(transport: &Transport) {
    for seat in transport.seats() {
        seat.try_occupy();
    }
}
