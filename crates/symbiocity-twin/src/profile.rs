//! The seed digital-twin profile.

use symbiocity_types::{
    Appearance, DigitalTwin, MobilityPreference, TraitVector, TwinId, TwinPreferences,
    WellnessGoals, WorkStyle,
};

/// Build the default twin profile used when a session starts without a
/// stored profile.
pub fn default_profile() -> DigitalTwin {
    DigitalTwin {
        id: TwinId::new(),
        name: String::from("Digital You"),
        appearance: Appearance {
            avatar: String::from("\u{1f916}"),
            color: String::from("hsl(200, 100%, 60%)"),
        },
        traits: TraitVector {
            energy: 0.8,
            social: 0.6,
            focus: 0.7,
            adaptability: 0.9,
        },
        wellness_goals: WellnessGoals {
            sleep_hours: 8.0,
            steps_per_day: 10_000,
            meditation_minutes: 15,
        },
        preferences: TwinPreferences {
            timezone: String::from("UTC"),
            work_style: WorkStyle::Focused,
            mobility_preference: MobilityPreference::Eco,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_values() {
        let twin = default_profile();
        assert_eq!(twin.name, "Digital You");
        assert_eq!(twin.traits.adaptability, 0.9);
        assert_eq!(twin.wellness_goals.steps_per_day, 10_000);
        assert_eq!(twin.preferences.work_style, WorkStyle::Focused);
        assert_eq!(twin.preferences.mobility_preference, MobilityPreference::Eco);
    }

    #[test]
    fn each_profile_gets_a_fresh_id() {
        assert_ne!(default_profile().id, default_profile().id);
    }
}
