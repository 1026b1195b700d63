//! Rule-based recommendation engine.
//!
//! [`advise`] is a pure function over the latest vital and environment
//! samples. Rules are evaluated in a fixed order and every matching rule
//! appends one entry, so the output order is the rule order. Conditions
//! are not mutually exclusive -- several can fire from one sample pair.
//!
//! | condition          | id             | category    | priority   |
//! |--------------------|----------------|-------------|------------|
//! | heart rate > 90    | `hr-high`      | health      | important  |
//! | stress > 0.7       | `stress-high`  | health      | critical   |
//! | air quality < 50   | `air-quality`  | environment | important  |
//! | steps < 3000       | `activity-low` | health      | suggestion |
//!
//! When no rule fires, exactly one `wellness-check` fallback is emitted
//! so the advisory list is never empty.
//!
//! The thresholds are fixed constants, not configuration: they are part
//! of the engine's observable contract and are unit-tested as such.

use symbiocity_types::{
    Priority, Recommendation, RecommendationCategory, RecommendedAction, TwinEnvironment,
    VitalSample,
};

/// Heart rate above this (bpm) triggers the `hr-high` rule.
const HEART_RATE_ALERT_BPM: f64 = 90.0;

/// Stress above this triggers the `stress-high` rule.
const STRESS_ALERT: f64 = 0.7;

/// Air quality below this score triggers the `air-quality` rule.
const AIR_QUALITY_ALERT: f64 = 50.0;

/// Step counts below this trigger the `activity-low` rule.
const LOW_STEPS: u32 = 3000;

/// Generate the advisory list for the given samples.
///
/// Either sample may be absent (the store starts in a loading state);
/// rules that depend on a missing sample simply do not fire. The
/// returned list fully replaces any previous one.
pub fn advise(
    vitals: Option<&VitalSample>,
    environment: Option<&TwinEnvironment>,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(sample) = vitals
        && sample.heart_rate > HEART_RATE_ALERT_BPM
    {
        recommendations.push(Recommendation {
            id: String::from("hr-high"),
            title: String::from("Elevated Heart Rate Detected"),
            description: String::from(
                "Consider taking a 5-minute breathing exercise or a short walk in the park district.",
            ),
            category: RecommendationCategory::Health,
            priority: Priority::Important,
            action: Some(RecommendedAction::ScheduleBreak),
        });
    }

    if let Some(sample) = vitals
        && sample.stress > STRESS_ALERT
    {
        recommendations.push(Recommendation {
            id: String::from("stress-high"),
            title: String::from("High Stress Levels"),
            description: String::from(
                "Virtual meditation session available in the Social Hub. Join now for instant calm.",
            ),
            category: RecommendationCategory::Health,
            priority: Priority::Critical,
            action: Some(RecommendedAction::JoinSocial {
                location: Some(String::from("Social Hub")),
                activity: Some(String::from("meditation")),
            }),
        });
    }

    if let Some(sample) = environment
        && sample.air_quality < AIR_QUALITY_ALERT
    {
        recommendations.push(Recommendation {
            id: String::from("air-quality"),
            title: String::from("Poor Air Quality Alert"),
            description: String::from(
                "Consider moving to the Climate-Controlled Office District or activating air purification.",
            ),
            category: RecommendationCategory::Environment,
            priority: Priority::Important,
            action: Some(RecommendedAction::BookMobility {
                destination: Some(String::from("Office District")),
            }),
        });
    }

    if let Some(sample) = vitals
        && sample.steps < LOW_STEPS
    {
        recommendations.push(Recommendation {
            id: String::from("activity-low"),
            title: String::from("Low Activity Today"),
            description: String::from(
                "Take a virtual tour of the city districts or join a walking group in the Social Hub.",
            ),
            category: RecommendationCategory::Health,
            priority: Priority::Suggestion,
            action: Some(RecommendedAction::JoinSocial {
                location: None,
                activity: Some(String::from("walking_group")),
            }),
        });
    }

    // Always surface at least one positive advisory.
    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            id: String::from("wellness-check"),
            title: String::from("Everything Looks Great!"),
            description: String::from(
                "Your vitals are optimal. Consider exploring new areas of the city or connecting with friends.",
            ),
            category: RecommendationCategory::Social,
            priority: Priority::Suggestion,
            action: Some(RecommendedAction::JoinSocial {
                location: None,
                activity: None,
            }),
        });
    }

    recommendations
}
