//! Web layer for the booking server.
//!
//! JSON endpoints for searching trips, inspecting seat maps, and making and
//! cancelling bookings.

mod config;
mod dto;
mod routes;
mod state;

pub use config::ServerConfig;
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
