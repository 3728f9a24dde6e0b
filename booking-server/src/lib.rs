//! Seat booking server.
//!
//! Loads a timetable of trains, buses and flights, searches it for trips
//! between two cities, and books seats on them without ever handing the same
//! seat to two passengers.

pub mod domain;
pub mod engine;
pub mod inventory;
pub mod loader;
pub mod search;
pub mod web;

#[cfg(test)]
mod test_support;
