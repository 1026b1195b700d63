//! Bounded async simulation loop.
//!
//! [`run_simulation`] drives [`SimulationState::advance`] one unit at a
//! time, sleeping the configured real-time interval between steps, with
//! support for:
//!
//! - **Bounded runs**: stop after `max_units` or `max_real_time_seconds`
//! - **Pause/resume**: the host can halt and continue the loop
//! - **Variable speed**: the step interval is adjustable at runtime
//! - **Clean stop**: an explicit stop request finishes the current step
//!   and returns
//!
//! The loop wraps the synchronous step in [`crate::tick`] and adds the
//! control plane around it.

use std::sync::Arc;

use tracing::info;

use crate::control::{RunControl, RunEndReason};
use crate::tick::{SimulationState, StepError, StepSummary};

/// Errors that can occur during a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A simulation step failed.
    #[error("step error: {source}")]
    Step {
        /// The underlying step error.
        #[from]
        source: StepError,
    },
}

/// Result of a simulation run.
#[derive(Debug)]
pub struct RunResult {
    /// The reason the run ended.
    pub end_reason: RunEndReason,
    /// The last step summary, if any step completed.
    pub final_summary: Option<StepSummary>,
    /// Total virtual units simulated.
    pub total_units: u64,
}

/// Callback invoked after each step completes.
///
/// Implementations can push snapshots to a UI, apply weather drift to
/// the city, log progress, etc. The callback receives the step summary
/// and mutable access to the state, so it may feed derived effects back
/// into the simulation before the next step.
pub trait StepCallback: Send {
    /// Called after a step completes successfully.
    fn on_step(&mut self, summary: &StepSummary, state: &mut SimulationState);
}

/// A no-op step callback for testing.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _summary: &StepSummary, _state: &mut SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// Each iteration advances virtual time by exactly one unit, so the
/// real-time pacing comes entirely from the step interval. An interval
/// of zero runs the simulation as fast as the executor allows.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails unrecoverably.
pub async fn run_simulation(
    state: &mut SimulationState,
    control: &Arc<RunControl>,
    callback: &mut dyn StepCallback,
) -> Result<RunResult, RunnerError> {
    let mut last_summary: Option<StepSummary> = None;
    let mut total_units: u64 = 0;

    info!(
        max_units = control.max_units(),
        max_real_time_seconds = control.max_real_time_seconds(),
        step_interval_ms = control.step_interval_ms(),
        "Simulation starting"
    );

    loop {
        if control.is_paused() {
            info!("Simulation paused, waiting for resume...");
            control.wait_if_paused().await;
            info!("Simulation resumed");
        }

        if control.is_stop_requested() {
            info!(total_units, "Stop requested");
            return Ok(RunResult {
                end_reason: RunEndReason::StopRequested,
                final_summary: last_summary,
                total_units,
            });
        }

        if control.time_limit_reached() {
            info!(
                max_seconds = control.max_real_time_seconds(),
                elapsed = control.elapsed_seconds(),
                "Real-time limit reached"
            );
            return Ok(RunResult {
                end_reason: RunEndReason::MaxRealTimeReached,
                final_summary: last_summary,
                total_units,
            });
        }

        let summary = state.advance(1)?;
        total_units = total_units.saturating_add(1);

        callback.on_step(&summary, state);

        // The clock has already moved, so summary.now is the unit that
        // just completed. With max_units = 5 the loop stops once unit 5
        // has run.
        if control.unit_limit_reached(summary.now) {
            info!(
                now = summary.now,
                max_units = control.max_units(),
                "Unit limit reached"
            );
            return Ok(RunResult {
                end_reason: RunEndReason::MaxUnitsReached,
                final_summary: Some(summary),
                total_units,
            });
        }

        last_summary = Some(summary);

        let interval_ms = control.step_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the end of a run. Call after [`run_simulation`] returns.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_units = result.total_units,
        final_recommendations = result.final_summary.map(|s| s.recommendation_count),
        "Simulation ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{SimulationBoundsConfig, SimulationConfig};

    fn simulation() -> SimulationState {
        let mut state = SimulationState::from_config(&SimulationConfig::default());
        state.start_timers().unwrap();
        state
    }

    fn control(max_units: u64) -> Arc<RunControl> {
        Arc::new(RunControl::new(
            0,
            &SimulationBoundsConfig {
                max_units,
                max_real_time_seconds: 0,
            },
        ))
    }

    /// Records per-step summaries for assertions.
    struct RecordingCallback {
        steps: Vec<StepSummary>,
    }

    impl StepCallback for RecordingCallback {
        fn on_step(&mut self, summary: &StepSummary, _state: &mut SimulationState) {
            self.steps.push(*summary);
        }
    }

    #[tokio::test]
    async fn run_stops_at_unit_limit() {
        let mut state = simulation();
        let control = control(12);
        let mut callback = NoOpCallback;

        let result = run_simulation(&mut state, &control, &mut callback)
            .await
            .unwrap();

        assert_eq!(result.end_reason, RunEndReason::MaxUnitsReached);
        assert_eq!(result.total_units, 12);
        assert_eq!(state.scheduler.now(), 12);
        let summary = result.final_summary.unwrap();
        assert_eq!(summary.now, 12);
    }

    #[tokio::test]
    async fn callback_sees_every_step() {
        let mut state = simulation();
        let control = control(10);
        let mut callback = RecordingCallback { steps: Vec::new() };

        let result = run_simulation(&mut state, &control, &mut callback)
            .await
            .unwrap();

        assert_eq!(result.total_units, 10);
        assert_eq!(callback.steps.len(), 10);
        // Units 5 and 10 carry the twin refresh.
        let refreshes: u32 = callback.steps.iter().map(|s| s.twin_refreshes).sum();
        assert_eq!(refreshes, 2);
        // Unit 10 carries the city clock advance.
        let advances: u32 = callback.steps.iter().map(|s| s.clock_advances).sum();
        assert_eq!(advances, 1);
    }

    #[tokio::test]
    async fn stop_request_ends_run_before_limit() {
        let mut state = simulation();
        let control = control(1_000_000);
        control.request_stop();
        let mut callback = NoOpCallback;

        let result = run_simulation(&mut state, &control, &mut callback)
            .await
            .unwrap();

        assert_eq!(result.end_reason, RunEndReason::StopRequested);
        assert_eq!(result.total_units, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn callback_mutations_feed_the_next_step() {
        struct DisconnectAt3 {
            seen: u64,
        }
        impl StepCallback for DisconnectAt3 {
            fn on_step(&mut self, _summary: &StepSummary, state: &mut SimulationState) {
                self.seen = self.seen.saturating_add(1);
                if self.seen == 3 {
                    state.twin.set_connected(false);
                }
            }
        }

        let mut state = simulation();
        let control = control(10);
        let mut callback = DisconnectAt3 { seen: 0 };

        let _ = run_simulation(&mut state, &control, &mut callback)
            .await
            .unwrap();

        // Disconnected before the first refresh at unit 5, so no
        // samples were drawn during the run.
        assert_eq!(state.twin.last_update(), 0);
    }
}
