//! Core entity structs for the Symbiocity simulation.
//!
//! These are the records the two state containers hold: the digital-twin
//! profile and its rolling samples, recommendations, districts and their
//! activities, mobility bookings, and the city environment.
//!
//! All timestamps are virtual time units owned by the scheduler -- the
//! simulation never reads the wall clock for domain state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    ActivityType, BookingStatus, MobilityMode, MobilityPreference, Priority,
    RecommendationCategory, Weather, WorkStyle,
};
use crate::ids::{BookingId, TwinId};

/// A point in the city's 3-D coordinate space.
pub type Position = [f64; 3];

// ---------------------------------------------------------------------------
// Digital twin profile
// ---------------------------------------------------------------------------

/// Visual descriptor for the twin's avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Appearance {
    /// Avatar glyph or asset reference.
    pub avatar: String,
    /// Accent color in any CSS-compatible notation.
    pub color: String,
}

/// Personality trait vector. Each component is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitVector {
    /// Physical and mental energy level.
    pub energy: f64,
    /// Preference for company over solitude.
    pub social: f64,
    /// Capacity for sustained attention.
    pub focus: f64,
    /// Comfort with change.
    pub adaptability: f64,
}

/// Daily wellness targets the twin tracks against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WellnessGoals {
    /// Target hours of sleep per night.
    pub sleep_hours: f64,
    /// Target step count per day.
    pub steps_per_day: u32,
    /// Target minutes of meditation per day.
    pub meditation_minutes: u32,
}

/// The twin owner's standing preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TwinPreferences {
    /// IANA timezone name.
    pub timezone: String,
    /// Preferred way of working.
    pub work_style: WorkStyle,
    /// Preferred mobility trade-off.
    pub mobility_preference: MobilityPreference,
}

/// The digital-twin profile. Immutable after creation; replaced
/// wholesale via `set_twin`. Exactly one instance exists per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DigitalTwin {
    /// Unique profile identifier.
    pub id: TwinId,
    /// Display name.
    pub name: String,
    /// Avatar descriptor.
    pub appearance: Appearance,
    /// Personality trait vector.
    pub traits: TraitVector,
    /// Daily wellness targets.
    pub wellness_goals: WellnessGoals,
    /// Standing preferences.
    pub preferences: TwinPreferences,
}

// ---------------------------------------------------------------------------
// Rolling samples
// ---------------------------------------------------------------------------

/// One biometric reading. A single "current" sample is retained and
/// replaced wholesale on every refresh; history is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VitalSample {
    /// Virtual time the sample was taken.
    pub timestamp: u64,
    /// Heart rate in beats per minute.
    pub heart_rate: f64,
    /// Blood oxygen saturation as a percentage.
    pub spo2: f64,
    /// Step count so far today.
    pub steps: u32,
    /// Mood score in `[0, 1]` (1 = great).
    pub mood: f64,
    /// Stress score in `[0, 1]` (1 = maximal).
    pub stress: f64,
}

/// One reading of the twin's immediate surroundings. Same
/// replace-wholesale lifecycle as [`VitalSample`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TwinEnvironment {
    /// Virtual time the sample was taken.
    pub timestamp: u64,
    /// Air quality index-like score (higher is cleaner).
    pub air_quality: f64,
    /// Ambient temperature in degrees Celsius.
    pub temperature: f64,
    /// Noise level in `[0, 1]`.
    pub noise: f64,
    /// Lighting level in `[0, 1]`.
    pub lighting: f64,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// A concrete follow-up a recommendation proposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendedAction {
    /// Step away from the current activity for a moment.
    ScheduleBreak,
    /// Join a social activity, optionally at a named location.
    JoinSocial {
        /// District or venue name, if a specific one is suggested.
        location: Option<String>,
        /// Activity slug, if a specific one is suggested.
        activity: Option<String>,
    },
    /// Book a mobility trip.
    BookMobility {
        /// Suggested destination district, if any.
        destination: Option<String>,
    },
    /// Change something about the immediate environment.
    AdjustEnvironment,
}

/// A generated advisory tied to a detected condition.
///
/// Lists of recommendations are always replaced as a whole, never
/// merged, so `id` only needs to be unique within one generation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Recommendation {
    /// Stable slug identifying the rule that produced this entry.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Longer advisory text.
    pub description: String,
    /// Life domain addressed.
    pub category: RecommendationCategory,
    /// Urgency.
    pub priority: Priority,
    /// Optional concrete follow-up.
    pub action: Option<RecommendedAction>,
}

// ---------------------------------------------------------------------------
// Districts and activities
// ---------------------------------------------------------------------------

/// A joinable activity hosted by a district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Activity {
    /// Human-readable slug, unique within the district.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Kind of activity.
    pub activity_type: ActivityType,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Nominal participant ceiling. Joining does not enforce it.
    pub capacity: u32,
    /// Number of participants currently joined.
    pub current_participants: u32,
    /// Scheduled start in virtual time, for timed activities.
    pub starts_at: Option<u64>,
}

impl Activity {
    /// Spots left before the nominal capacity, saturating at zero when
    /// the activity is over-subscribed.
    pub const fn spots_remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.current_participants)
    }
}

/// A named zone of the simulated city.
///
/// The district set is seeded once at startup and never grows or
/// shrinks at runtime; only activity participant counters change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct District {
    /// Human-readable slug (`"home"`, `"office"`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Position in city space.
    pub position: Position,
    /// Accent color in any CSS-compatible notation.
    pub color: String,
    /// Icon glyph or asset reference.
    pub icon: String,
    /// Whether the district is currently open to visitors.
    pub available: bool,
    /// Resident population count.
    pub population: u32,
    /// Activities hosted here, in display order.
    pub activities: Vec<Activity>,
}

// ---------------------------------------------------------------------------
// Mobility
// ---------------------------------------------------------------------------

/// Caller-supplied fields for a new mobility booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BookingRequest {
    /// Origin district name.
    pub origin: String,
    /// Destination district name.
    pub destination: String,
    /// Transport mode.
    pub mode: MobilityMode,
    /// Travel duration once en route, in virtual seconds.
    pub estimated_time: u64,
}

/// A scheduled mobility trip between two districts.
///
/// Bookings accumulate for the session lifetime; they are never
/// deleted, and once the status is terminal it never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MobilityBooking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Origin district name.
    pub origin: String,
    /// Destination district name.
    pub destination: String,
    /// Transport mode.
    pub mode: MobilityMode,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Travel duration once en route, in virtual seconds.
    pub estimated_time: u64,
    /// Virtual time the booking was created.
    pub booked_at: u64,
    /// Virtual time the trip departed, once en route.
    pub start_time: Option<u64>,
}

// ---------------------------------------------------------------------------
// City environment
// ---------------------------------------------------------------------------

/// Ambient state of the whole city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CityEnvironment {
    /// Hour of day in `[0, 24)`, fractional.
    pub time_of_day: f64,
    /// Current weather.
    pub weather: Weather,
    /// Ambient temperature in degrees Celsius.
    pub temperature: f64,
    /// Wind intensity in `[0, 1]`.
    pub wind: f64,
    /// Ambient lighting level in `[0, 1]`.
    pub ambient_lighting: f64,
}

/// A partial update to [`CityEnvironment`]. Fields left as `None` keep
/// their current value (shallow merge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CityEnvironmentPatch {
    /// New hour of day, if changing.
    pub time_of_day: Option<f64>,
    /// New weather, if changing.
    pub weather: Option<Weather>,
    /// New temperature, if changing.
    pub temperature: Option<f64>,
    /// New wind intensity, if changing.
    pub wind: Option<f64>,
    /// New ambient lighting, if changing.
    pub ambient_lighting: Option<f64>,
}

impl CityEnvironmentPatch {
    /// Merge this patch into an environment, field by field.
    pub fn apply_to(&self, env: &mut CityEnvironment) {
        if let Some(time_of_day) = self.time_of_day {
            env.time_of_day = time_of_day;
        }
        if let Some(weather) = self.weather {
            env.weather = weather;
        }
        if let Some(temperature) = self.temperature {
            env.temperature = temperature;
        }
        if let Some(wind) = self.wind {
            env.wind = wind;
        }
        if let Some(ambient_lighting) = self.ambient_lighting {
            env.ambient_lighting = ambient_lighting;
        }
    }

    /// Whether the patch changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.time_of_day.is_none()
            && self.weather.is_none()
            && self.temperature.is_none()
            && self.wind.is_none()
            && self.ambient_lighting.is_none()
    }
}
