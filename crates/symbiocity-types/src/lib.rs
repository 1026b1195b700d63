//! Shared type definitions for the Symbiocity simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Symbiocity workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the city dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for generated identifiers
//! - [`enums`] -- Closed vocabularies (categories, statuses, weather)
//! - [`structs`] -- Entity records (twin, samples, districts, bookings)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActivityType, BookingStatus, MobilityMode, MobilityPreference, Priority,
    RecommendationCategory, Weather, WorkStyle,
};
pub use ids::{BookingId, TwinId};
pub use structs::{
    Activity, Appearance, BookingRequest, CityEnvironment, CityEnvironmentPatch, DigitalTwin,
    District, MobilityBooking, Position, Recommendation, RecommendedAction, TraitVector,
    TwinEnvironment, TwinPreferences, VitalSample, WellnessGoals,
};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::TwinId::export_all();
        let _ = crate::ids::BookingId::export_all();

        // Enums
        let _ = crate::enums::RecommendationCategory::export_all();
        let _ = crate::enums::Priority::export_all();
        let _ = crate::enums::ActivityType::export_all();
        let _ = crate::enums::MobilityMode::export_all();
        let _ = crate::enums::BookingStatus::export_all();
        let _ = crate::enums::Weather::export_all();
        let _ = crate::enums::WorkStyle::export_all();
        let _ = crate::enums::MobilityPreference::export_all();

        // Structs
        let _ = crate::structs::DigitalTwin::export_all();
        let _ = crate::structs::VitalSample::export_all();
        let _ = crate::structs::TwinEnvironment::export_all();
        let _ = crate::structs::Recommendation::export_all();
        let _ = crate::structs::District::export_all();
        let _ = crate::structs::Activity::export_all();
        let _ = crate::structs::MobilityBooking::export_all();
        let _ = crate::structs::CityEnvironment::export_all();
    }
}
