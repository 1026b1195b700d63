//! Seeded mock sensor feed.
//!
//! There are no real sensors behind the simulation: every "reading" is
//! drawn uniformly from the declared ranges below and stamped with the
//! caller's virtual time. The feed owns a [`SmallRng`] seeded from the
//! world seed so that a run is reproducible end to end.
//!
//! Declared ranges:
//!
//! - heart rate 70..100 bpm, `spo2` 96..100 %, steps 5000..6000,
//!   mood 0..1, stress 0..0.8
//! - air quality 60..100, temperature 20..30 C, noise 0..0.8,
//!   lighting 0..1

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use symbiocity_types::{TwinEnvironment, VitalSample};

/// Draw one biometric sample from the declared ranges.
pub fn generate_vitals(rng: &mut impl Rng, now: u64) -> VitalSample {
    VitalSample {
        timestamp: now,
        heart_rate: rng.random_range(70.0..100.0),
        spo2: rng.random_range(96.0..100.0),
        steps: rng.random_range(5000..6000),
        mood: rng.random_range(0.0..1.0),
        stress: rng.random_range(0.0..0.8),
    }
}

/// Draw one environment sample from the declared ranges.
pub fn generate_environment(rng: &mut impl Rng, now: u64) -> TwinEnvironment {
    TwinEnvironment {
        timestamp: now,
        air_quality: rng.random_range(60.0..100.0),
        temperature: rng.random_range(20.0..30.0),
        noise: rng.random_range(0.0..0.8),
        lighting: rng.random_range(0.0..1.0),
    }
}

/// The simulation's only source of "live" data.
///
/// Wraps a seeded PRNG; the same seed always produces the same sequence
/// of samples, which keeps full simulation runs replayable.
#[derive(Debug, Clone)]
pub struct SensorFeed {
    /// Seeded generator behind all samples.
    rng: SmallRng,
}

impl SensorFeed {
    /// Create a feed from a world seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Produce a fresh biometric sample stamped at `now`.
    pub fn sample_vitals(&mut self, now: u64) -> VitalSample {
        generate_vitals(&mut self.rng, now)
    }

    /// Produce a fresh environment sample stamped at `now`.
    pub fn sample_environment(&mut self, now: u64) -> TwinEnvironment {
        generate_environment(&mut self.rng, now)
    }
}
