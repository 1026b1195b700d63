//! City weather generation.
//!
//! The city's weather drifts with the time of day using phase-weighted
//! probabilities and deterministic randomness, so a seeded run always
//! replays the same sky.
//!
//! | Weather  | Morning | Afternoon | Evening | Night |
//! |----------|---------|-----------|---------|-------|
//! | Sunny    | 40%     | 45%       | 20%     |  0%   |
//! | Cloudy   | 25%     | 25%       | 30%     | 25%   |
//! | Rainy    | 15%     | 15%       | 20%     | 15%   |
//! | Foggy    | 10%     |  0%       | 15%     | 20%   |
//! | Aurora   |  0%     |  0%       |  0%     | 25%   |
//! | (repeat) | 10%     | 15%       | 15%     | 15%   |
//!
//! The "repeat" weight keeps the previous weather, which gives streaks
//! a natural feel. Aurora only ever appears at night.
//!
//! The generator itself never touches [`CityEnvironment`]: it produces
//! values, and the engine applies them through the normal patch-merge
//! path of the city state container.
//!
//! [`CityEnvironment`]: symbiocity_types::CityEnvironment

use symbiocity_types::Weather;

/// A coarse phase of the city day, derived from the fractional hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// 06:00 to 12:00.
    Morning,
    /// 12:00 to 18:00.
    Afternoon,
    /// 18:00 to 22:00.
    Evening,
    /// 22:00 to 06:00.
    Night,
}

impl DayPhase {
    /// Classify a fractional hour in `[0, 24)` into a phase.
    ///
    /// Out-of-range inputs are folded into the day first, so the
    /// function is total.
    pub fn from_hour(hour: f64) -> Self {
        let folded = hour.rem_euclid(24.0);
        if (6.0..12.0).contains(&folded) {
            Self::Morning
        } else if (12.0..18.0).contains(&folded) {
            Self::Afternoon
        } else if (18.0..22.0).contains(&folded) {
            Self::Evening
        } else {
            Self::Night
        }
    }
}

/// Phase-specific weather weights.
///
/// Each entry is `(Some(weather), weight)` or `(None, weight)` where
/// `None` means "repeat the previous weather".
#[derive(Debug, Clone)]
pub struct PhaseWeights {
    entries: Vec<(Option<Weather>, u32)>,
}

impl PhaseWeights {
    /// Return the weather weights for the given day phase.
    pub fn for_phase(phase: DayPhase) -> Self {
        let entries = match phase {
            DayPhase::Morning => vec![
                (Some(Weather::Sunny), 40),
                (Some(Weather::Cloudy), 25),
                (Some(Weather::Rainy), 15),
                (Some(Weather::Foggy), 10),
                (Some(Weather::Aurora), 0),
                (None, 10), // repeat
            ],
            DayPhase::Afternoon => vec![
                (Some(Weather::Sunny), 45),
                (Some(Weather::Cloudy), 25),
                (Some(Weather::Rainy), 15),
                (Some(Weather::Foggy), 0),
                (Some(Weather::Aurora), 0),
                (None, 15), // repeat
            ],
            DayPhase::Evening => vec![
                (Some(Weather::Sunny), 20),
                (Some(Weather::Cloudy), 30),
                (Some(Weather::Rainy), 20),
                (Some(Weather::Foggy), 15),
                (Some(Weather::Aurora), 0),
                (None, 15), // repeat
            ],
            DayPhase::Night => vec![
                (Some(Weather::Sunny), 0),
                (Some(Weather::Cloudy), 25),
                (Some(Weather::Rainy), 15),
                (Some(Weather::Foggy), 20),
                (Some(Weather::Aurora), 25),
                (None, 15), // repeat
            ],
        };
        Self { entries }
    }

    /// Select a weather (or repeat signal) for a roll in
    /// `[0, total_weight())`.
    fn select(&self, roll: u32) -> Option<Weather> {
        let mut cumulative: u32 = 0;
        for &(weather, weight) in &self.entries {
            cumulative = cumulative.saturating_add(weight);
            if roll < cumulative {
                return weather;
            }
        }
        // Fallback if the roll somehow exceeds the table.
        Some(Weather::Cloudy)
    }

    /// Sum of all entry weights.
    fn total_weight(&self) -> u32 {
        let mut total: u32 = 0;
        for &(_, weight) in &self.entries {
            total = total.saturating_add(weight);
        }
        total
    }
}

/// Deterministic weather generator for the city sky.
///
/// The same `(seed, tick)` pair always yields the same weather, so
/// seeded simulation runs replay identically.
#[derive(Debug, Clone)]
pub struct WeatherSystem {
    /// World seed used to derive per-tick randomness.
    seed: u64,

    /// Weather from the previous roll (for "repeat" outcomes).
    previous: Weather,
}

impl WeatherSystem {
    /// Create a weather system; the city starts sunny.
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            previous: Weather::Sunny,
        }
    }

    /// Roll the weather for a virtual instant and hour of day.
    ///
    /// Updates the internal previous-weather state so repeat rolls can
    /// carry streaks forward.
    pub fn generate(&mut self, tick: u64, hour: f64) -> Weather {
        let weights = PhaseWeights::for_phase(DayPhase::from_hour(hour));
        let total = weights.total_weight();
        if total == 0 {
            return self.previous;
        }

        let random = mix(self.seed, tick);
        // The remainder is strictly below `total` (a u32), so the
        // narrowing conversion cannot fail.
        let remainder = random.checked_rem(u64::from(total)).unwrap_or(0);
        let roll = u32::try_from(remainder).unwrap_or(0);

        let weather = weights.select(roll).unwrap_or(self.previous);
        self.previous = weather;
        weather
    }

    /// The weather from the previous roll.
    pub const fn previous(&self) -> Weather {
        self.previous
    }

    /// Override the previous weather (state restoration).
    pub const fn set_previous(&mut self, weather: Weather) {
        self.previous = weather;
    }
}

/// Deterministic mixing function (splitmix64 finalizer).
///
/// Produces a well-distributed value from `(seed, tick)`; the same
/// inputs always give the same output.
const fn mix(seed: u64, tick: u64) -> u64 {
    let mut z = seed
        .wrapping_add(tick.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
