//! Step callback that drives the city weather.
//!
//! The city state itself never rolls weather; it only applies patches.
//! This callback bridges the two: whenever the city clock advances, it
//! asks the deterministic [`WeatherSystem`] for the next condition and
//! feeds the result (plus the derived temperature and lighting) back
//! into the city as a [`CityEnvironmentPatch`].

use symbiocity_city::{DayPhase, WeatherSystem};
use symbiocity_core::runner::StepCallback;
use symbiocity_core::tick::{SimulationState, StepSummary};
use symbiocity_types::{CityEnvironmentPatch, Weather};
use tracing::{debug, info};

/// Typical ambient temperature for a weather condition, in Celsius.
const fn temperature_for(weather: Weather) -> f64 {
    match weather {
        Weather::Sunny => 26.0,
        Weather::Cloudy => 21.0,
        Weather::Rainy => 17.0,
        Weather::Foggy => 15.0,
        Weather::Aurora => 9.0,
    }
}

/// Baseline ambient lighting for a phase of day.
const fn lighting_for(phase: DayPhase) -> f64 {
    match phase {
        DayPhase::Morning => 0.7,
        DayPhase::Afternoon => 0.9,
        DayPhase::Evening => 0.5,
        DayPhase::Night => 0.2,
    }
}

/// Callback that rolls weather on every city clock advance.
pub struct WeatherCallback {
    weather: WeatherSystem,
}

impl WeatherCallback {
    /// Create a weather callback seeded for deterministic replays.
    pub const fn new(seed: u64) -> Self {
        Self {
            weather: WeatherSystem::new(seed),
        }
    }
}

impl StepCallback for WeatherCallback {
    fn on_step(&mut self, summary: &StepSummary, state: &mut SimulationState) {
        if summary.clock_advances == 0 {
            return;
        }

        let hour = state.city.environment().time_of_day;
        let weather = self.weather.generate(summary.now, hour);
        let patch = CityEnvironmentPatch {
            weather: Some(weather),
            temperature: Some(temperature_for(weather)),
            ambient_lighting: Some(lighting_for(DayPhase::from_hour(hour))),
            ..CityEnvironmentPatch::default()
        };
        state.city.update_environment(&patch);

        debug!(now = summary.now, hour, weather = ?weather, "Weather rolled");
        if summary.twin_refreshes > 0 {
            info!(
                now = summary.now,
                weather = ?weather,
                recommendations = summary.recommendation_count,
                bookings = state.city.bookings().len(),
                "Step completed"
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use symbiocity_core::config::SimulationConfig;

    #[test]
    fn clock_advance_updates_city_weather_fields() {
        let mut state = SimulationState::from_config(&SimulationConfig::default());
        state.start_timers().unwrap();
        let mut callback = WeatherCallback::new(7);

        // City clock fires at unit 10.
        let summary = state.advance(10).unwrap();
        assert_eq!(summary.clock_advances, 1);
        callback.on_step(&summary, &mut state);

        let env = state.city.environment();
        let expected = temperature_for(env.weather);
        assert!((env.temperature - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn no_clock_advance_leaves_environment_untouched() {
        let mut state = SimulationState::from_config(&SimulationConfig::default());
        state.start_timers().unwrap();
        let mut callback = WeatherCallback::new(7);

        let before = *state.city.environment();
        let summary = state.advance(5).unwrap();
        assert_eq!(summary.clock_advances, 0);
        callback.on_step(&summary, &mut state);

        assert_eq!(*state.city.environment(), before);
    }

    #[test]
    fn same_seed_rolls_the_same_forecast() {
        let mut a = WeatherCallback::new(99);
        let mut b = WeatherCallback::new(99);
        let mut state_a = SimulationState::from_config(&SimulationConfig::default());
        let mut state_b = SimulationState::from_config(&SimulationConfig::default());
        state_a.start_timers().unwrap();
        state_b.start_timers().unwrap();

        for _ in 0..12 {
            let sa = state_a.advance(10).unwrap();
            let sb = state_b.advance(10).unwrap();
            a.on_step(&sa, &mut state_a);
            b.on_step(&sb, &mut state_b);
        }

        assert_eq!(state_a.city.environment(), state_b.city.environment());
    }
}
