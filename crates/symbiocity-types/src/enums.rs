//! Enumeration types for the Symbiocity simulation.
//!
//! Every closed vocabulary in the data model lives here: recommendation
//! categories and priorities, activity and mobility kinds, the booking
//! status lifecycle, city weather, and the twin's preference vocabularies.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// The life domain a recommendation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    /// Biometric wellbeing (heart rate, stress, activity).
    Health,
    /// Getting around the city.
    Mobility,
    /// Community and connection.
    Social,
    /// Focus and productivity.
    Work,
    /// Air, temperature, noise, lighting.
    Environment,
}

/// How urgently a recommendation should be surfaced.
///
/// Variants are ordered most-urgent-first so that `Critical < Important`
/// under the derived ordering, which lets a dashboard sort ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention now (level 1).
    Critical,
    /// Worth acting on soon (level 2).
    Important,
    /// Nice to have (level 3).
    Suggestion,
}

impl Priority {
    /// Return the numeric urgency level (1 = critical, 3 = suggestion).
    pub const fn level(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::Important => 2,
            Self::Suggestion => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// City activities and mobility
// ---------------------------------------------------------------------------

/// The kind of activity a district hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Productive work sessions (meetings, deep work).
    Work,
    /// Community gatherings.
    Social,
    /// Wellness and medical activities.
    Health,
    /// Performances and leisure.
    Entertainment,
    /// Movement between districts.
    Transport,
}

/// The transport mode of a mobility booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum MobilityMode {
    /// Autonomous transit pod.
    Pod,
    /// Instant relocation between districts.
    Teleport,
    /// On foot.
    Walk,
    /// Aerial transit.
    Fly,
}

/// Lifecycle status of a mobility booking.
///
/// Bookings move `Scheduled -> Enroute -> Arrived` on deferred timers.
/// `Arrived` and `Cancelled` are terminal: a booking in either state is
/// never mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Booked, departure pending.
    Scheduled,
    /// Currently travelling.
    Enroute,
    /// Trip completed.
    Arrived,
    /// Trip called off before completion.
    Cancelled,
}

impl BookingStatus {
    /// Whether this status ends the booking lifecycle.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Arrived | Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// City environment
// ---------------------------------------------------------------------------

/// Weather over the simulated city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// Clear skies.
    Sunny,
    /// Overcast.
    Cloudy,
    /// Precipitation.
    Rainy,
    /// Reduced visibility.
    Foggy,
    /// Night-sky light display.
    Aurora,
}

// ---------------------------------------------------------------------------
// Twin preferences
// ---------------------------------------------------------------------------

/// The twin owner's preferred way of working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum WorkStyle {
    /// Long uninterrupted sessions.
    Focused,
    /// Frequent interaction with others.
    Collaborative,
    /// Mixes both as the day demands.
    Flexible,
}

/// The twin owner's preferred trade-off when booking mobility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum MobilityPreference {
    /// Lowest footprint.
    Eco,
    /// Fastest arrival.
    Speed,
    /// Most pleasant ride.
    Comfort,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&Weather::Sunny).unwrap(), "\"sunny\"");
        assert_eq!(
            serde_json::to_string(&BookingStatus::Enroute).unwrap(),
            "\"enroute\""
        );
        assert_eq!(serde_json::to_string(&MobilityMode::Pod).unwrap(), "\"pod\"");
        assert_eq!(
            serde_json::to_string(&RecommendationCategory::Health).unwrap(),
            "\"health\""
        );
    }

    #[test]
    fn priority_levels_are_one_indexed() {
        assert_eq!(Priority::Critical.level(), 1);
        assert_eq!(Priority::Important.level(), 2);
        assert_eq!(Priority::Suggestion.level(), 3);
    }

    #[test]
    fn priority_orders_most_urgent_first() {
        assert!(Priority::Critical < Priority::Important);
        assert!(Priority::Important < Priority::Suggestion);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!BookingStatus::Scheduled.is_terminal());
        assert!(!BookingStatus::Enroute.is_terminal());
        assert!(BookingStatus::Arrived.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }
}
