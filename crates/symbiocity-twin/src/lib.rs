//! Digital-twin state for the Symbiocity simulation.
//!
//! This crate owns everything on the twin side of the city:
//!
//! - [`state::TwinState`] -- the state container (profile, rolling
//!   samples, recommendations, connectivity)
//! - [`advisor`] -- the pure rule-based recommendation engine
//! - [`sensors`] -- the seeded mock sensor feed
//! - [`profile`] -- the seed twin profile
//!
//! The crate holds no timers: refresh cadence belongs to the scheduler
//! in `symbiocity-core`, which calls into [`state::TwinState`].

pub mod advisor;
pub mod profile;
pub mod sensors;
pub mod state;

pub use advisor::advise;
pub use profile::default_profile;
pub use sensors::SensorFeed;
pub use state::TwinState;
