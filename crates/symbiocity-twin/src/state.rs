//! The twin-side state container.
//!
//! [`TwinState`] owns the digital-twin profile, the current vital and
//! environment samples, the derived recommendation list, and the
//! connectivity flag. It is an explicit handle -- the scheduler and any
//! observers receive a reference rather than reaching for a global.
//!
//! Samples are replaced wholesale; every replacement stamps
//! `last_update` and synchronously regenerates the recommendation list,
//! so observers always see advice consistent with the latest data.
//! Absent samples (`None`) are the loading state, not an error.

use tracing::debug;

use symbiocity_types::{DigitalTwin, Recommendation, TwinEnvironment, VitalSample};

use crate::advisor;
use crate::profile;
use crate::sensors::SensorFeed;

/// Mutable twin-side state for one session.
#[derive(Debug, Clone)]
pub struct TwinState {
    twin: Option<DigitalTwin>,
    vitals: Option<VitalSample>,
    environment: Option<TwinEnvironment>,
    recommendations: Vec<Recommendation>,
    connected: bool,
    last_update: u64,
}

impl TwinState {
    /// Create an empty (loading) state: no profile, no samples, no
    /// recommendations, connected.
    pub const fn new() -> Self {
        Self {
            twin: None,
            vitals: None,
            environment: None,
            recommendations: Vec::new(),
            connected: true,
            last_update: 0,
        }
    }

    /// Create a fully seeded state: default profile, one sample of each
    /// kind drawn from the feed, and an initial recommendation list so
    /// the first observer snapshot is never empty.
    pub fn seeded(feed: &mut SensorFeed, now: u64) -> Self {
        let mut state = Self::new();
        state.set_twin(profile::default_profile());
        state.update_vitals(feed.sample_vitals(now), now);
        state.update_environment(feed.sample_environment(now), now);
        state
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Replace the twin profile wholesale.
    pub fn set_twin(&mut self, twin: DigitalTwin) {
        debug!(twin_id = %twin.id, name = twin.name, "Twin profile replaced");
        self.twin = Some(twin);
    }

    /// Replace the current vital sample, stamp `last_update`, and
    /// regenerate recommendations from the new data.
    pub fn update_vitals(&mut self, sample: VitalSample, now: u64) {
        self.vitals = Some(sample);
        self.last_update = now;
        self.generate_recommendations();
    }

    /// Replace the current environment sample, stamp `last_update`, and
    /// regenerate recommendations from the new data.
    pub fn update_environment(&mut self, sample: TwinEnvironment, now: u64) {
        self.environment = Some(sample);
        self.last_update = now;
        self.generate_recommendations();
    }

    /// Replace the recommendation list wholesale.
    pub fn set_recommendations(&mut self, recommendations: Vec<Recommendation>) {
        self.recommendations = recommendations;
    }

    /// Toggle the connectivity flag. While disconnected, the periodic
    /// refresh task still fires but must skip mutation.
    pub const fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Recompute the recommendation list from the current samples and
    /// replace it atomically.
    pub fn generate_recommendations(&mut self) {
        self.recommendations =
            advisor::advise(self.vitals.as_ref(), self.environment.as_ref());
        debug!(
            count = self.recommendations.len(),
            "Recommendations regenerated"
        );
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The twin profile, if loaded.
    pub const fn twin(&self) -> Option<&DigitalTwin> {
        self.twin.as_ref()
    }

    /// The current vital sample, if any has been taken.
    pub const fn vitals(&self) -> Option<&VitalSample> {
        self.vitals.as_ref()
    }

    /// The current environment sample, if any has been taken.
    pub const fn environment(&self) -> Option<&TwinEnvironment> {
        self.environment.as_ref()
    }

    /// The current recommendation list, most recent generation.
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Whether the twin is considered connected to its data feed.
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Virtual time of the last sample replacement.
    pub const fn last_update(&self) -> u64 {
        self.last_update
    }
}

impl Default for TwinState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_vitals(heart_rate: f64) -> VitalSample {
        VitalSample {
            timestamp: 10,
            heart_rate,
            spo2: 98.0,
            steps: 8000,
            mood: 0.9,
            stress: 0.1,
        }
    }

    #[test]
    fn new_state_is_loading() {
        let state = TwinState::new();
        assert!(state.twin().is_none());
        assert!(state.vitals().is_none());
        assert!(state.environment().is_none());
        assert!(state.recommendations().is_empty());
        assert!(state.is_connected());
    }

    #[test]
    fn seeded_state_has_everything() {
        let mut feed = SensorFeed::from_seed(42);
        let state = TwinState::seeded(&mut feed, 5);
        assert!(state.twin().is_some());
        assert!(state.vitals().is_some());
        assert!(state.environment().is_some());
        assert!(!state.recommendations().is_empty());
        assert_eq!(state.last_update(), 5);
    }

    #[test]
    fn update_vitals_regenerates_recommendations() {
        let mut state = TwinState::new();
        state.update_vitals(sample_vitals(95.0), 20);

        assert_eq!(state.last_update(), 20);
        assert!(state.recommendations().iter().any(|r| r.id == "hr-high"));

        // A calm sample replaces the list entirely.
        state.update_vitals(sample_vitals(70.0), 25);
        assert!(state.recommendations().iter().all(|r| r.id != "hr-high"));
    }

    #[test]
    fn update_environment_stamps_and_regenerates() {
        let mut state = TwinState::new();
        state.update_environment(
            TwinEnvironment {
                timestamp: 30,
                air_quality: 40.0,
                temperature: 22.0,
                noise: 0.3,
                lighting: 0.5,
            },
            30,
        );
        assert_eq!(state.last_update(), 30);
        assert!(state.recommendations().iter().any(|r| r.id == "air-quality"));
    }

    #[test]
    fn set_recommendations_replaces_wholesale() {
        let mut feed = SensorFeed::from_seed(1);
        let mut state = TwinState::seeded(&mut feed, 0);
        state.set_recommendations(Vec::new());
        assert!(state.recommendations().is_empty());
    }

    #[test]
    fn connectivity_toggles() {
        let mut state = TwinState::new();
        assert!(state.is_connected());
        state.set_connected(false);
        assert!(!state.is_connected());
        state.set_connected(true);
        assert!(state.is_connected());
    }
}
