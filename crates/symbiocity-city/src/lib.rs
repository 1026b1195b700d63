//! City-side state for the Symbiocity simulation.
//!
//! This crate owns everything about the simulated city:
//!
//! - [`state::CityState`] -- the state container (districts, bookings,
//!   environment, session toggles)
//! - [`seed_city`] -- the static four-district seed map
//! - [`environment`] -- the deterministic phase-weighted weather
//!   generator
//!
//! Timers live elsewhere: the city clock and booking transitions are
//! driven by the scheduler in `symbiocity-core`.

pub mod environment;
pub mod seed_city;
pub mod state;

pub use environment::{DayPhase, WeatherSystem};
pub use seed_city::starting_districts;
pub use state::CityState;
