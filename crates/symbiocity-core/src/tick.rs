//! Simulation state and task dispatch.
//!
//! [`SimulationState`] bundles the two state containers, the sensor
//! feed, and the scheduler into one explicit handle -- there are no
//! ambient globals, so tests build as many isolated simulations as they
//! like with no process-wide reset.
//!
//! [`SimulationState::advance`] moves virtual time forward, executing
//! every task that falls due along the way:
//!
//! - **Twin refresh** (periodic): skipped entirely while disconnected.
//!   Otherwise draws a fresh vital sample; if the twin's data was
//!   already stale beyond the configured window, also draws a fresh
//!   environment sample.
//! - **City clock** (periodic): advances the time of day regardless of
//!   connectivity.
//! - **Booking departure / arrival** (one-shot): walk a booking through
//!   `Scheduled -> Enroute -> Arrived`. The arrival is scheduled only
//!   when the departure actually applied, and transitions against
//!   unknown or already-terminal bookings are silently dropped.
//!
//! All mutation is synchronous within `advance`; nothing preempts a
//! task mid-execution.

use tracing::{debug, info};

use symbiocity_city::CityState;
use symbiocity_twin::{SensorFeed, TwinState};
use symbiocity_types::{BookingId, BookingRequest, BookingStatus, MobilityBooking};

use crate::config::{SimulationConfig, TimerConfig};
use crate::scheduler::{Scheduler, SchedulerError, Task};

/// Errors that can occur while advancing the simulation.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A scheduling operation failed.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: SchedulerError,
    },
}

/// Booking tallies by status at the end of a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingCounts {
    /// Bookings waiting to depart.
    pub scheduled: u32,
    /// Bookings currently travelling.
    pub enroute: u32,
    /// Completed bookings.
    pub arrived: u32,
    /// Cancelled bookings.
    pub cancelled: u32,
}

impl BookingCounts {
    /// Tally bookings by status.
    fn tally(bookings: &[MobilityBooking]) -> Self {
        let mut counts = Self::default();
        for booking in bookings {
            let slot = match booking.status {
                BookingStatus::Scheduled => &mut counts.scheduled,
                BookingStatus::Enroute => &mut counts.enroute,
                BookingStatus::Arrived => &mut counts.arrived,
                BookingStatus::Cancelled => &mut counts.cancelled,
            };
            *slot = slot.saturating_add(1);
        }
        counts
    }
}

/// Summary of one [`SimulationState::advance`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepSummary {
    /// Virtual time after the step.
    pub now: u64,
    /// Twin refreshes that mutated state.
    pub twin_refreshes: u32,
    /// Twin refreshes skipped because the twin was disconnected.
    pub skipped_refreshes: u32,
    /// Environment samples regenerated due to staleness.
    pub environment_refreshes: u32,
    /// City clock advances.
    pub clock_advances: u32,
    /// Booking status transitions that applied.
    pub booking_transitions: u32,
    /// Booking tallies by status after the step.
    pub bookings: BookingCounts,
    /// Size of the recommendation list after the step.
    pub recommendation_count: usize,
}

/// The complete simulation: both stores, the sensor feed, and the
/// scheduler that owns all timers.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The virtual-time task queue.
    pub scheduler: Scheduler,
    /// Twin-side state (profile, samples, recommendations).
    pub twin: TwinState,
    /// City-side state (districts, bookings, environment).
    pub city: CityState,
    /// Seeded source of mock sensor samples.
    pub sensors: SensorFeed,
    /// Timer periods for the recurring tasks.
    pub timers: TimerConfig,
    timers_started: bool,
}

impl SimulationState {
    /// Build a fully seeded simulation from configuration: default twin
    /// profile with initial samples and recommendations, the seed city,
    /// and an empty scheduler. Call [`Self::start_timers`] to install
    /// the recurring tasks.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let scheduler = Scheduler::new();
        let mut sensors = SensorFeed::from_seed(config.world.seed);
        let twin = TwinState::seeded(&mut sensors, scheduler.now());
        let city = CityState::seeded(scheduler.now());
        Self {
            scheduler,
            twin,
            city,
            sensors,
            timers: config.timers,
            timers_started: false,
        }
    }

    /// Install the two recurring tasks (twin refresh, city clock).
    ///
    /// Idempotent: redundant calls are no-ops, so application startup
    /// paths can call this freely without duplicating timers.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Scheduler`] if the first due times cannot
    /// be scheduled.
    pub fn start_timers(&mut self) -> Result<(), StepError> {
        if self.timers_started {
            debug!("Timers already started, ignoring redundant init");
            return Ok(());
        }
        self.scheduler
            .schedule_periodic(self.timers.twin_refresh_period, Task::RefreshTwin)?;
        self.scheduler
            .schedule_periodic(self.timers.city_clock_period, Task::AdvanceCityClock)?;
        self.timers_started = true;
        info!(
            twin_refresh_period = self.timers.twin_refresh_period,
            city_clock_period = self.timers.city_clock_period,
            "Recurring timers installed"
        );
        Ok(())
    }

    /// Whether the recurring timers have been installed.
    pub const fn timers_started(&self) -> bool {
        self.timers_started
    }

    /// Book a mobility trip and schedule its status lifecycle.
    ///
    /// The booking is recorded immediately with status `Scheduled`; the
    /// departure fires after the configured delay and the arrival
    /// `estimated_time` units after that. The timers are fire-and-forget:
    /// there is no cancellation path, but transitions against a booking
    /// that was cancelled in the meantime are silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Scheduler`] if the departure cannot be
    /// scheduled.
    pub fn book_mobility(&mut self, request: BookingRequest) -> Result<BookingId, StepError> {
        let id = self.city.book_mobility(request, self.scheduler.now());
        self.scheduler
            .schedule_once(self.timers.departure_delay, Task::BookingDeparture(id))?;
        Ok(id)
    }

    /// Advance virtual time by `units`, executing every task that falls
    /// due along the way in deterministic order.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Scheduler`] if the virtual clock would
    /// overflow.
    pub fn advance(&mut self, units: u64) -> Result<StepSummary, StepError> {
        let target = self
            .scheduler
            .now()
            .checked_add(units)
            .ok_or(SchedulerError::ClockOverflow)?;

        let mut summary = StepSummary::default();
        while let Some(task) = self.scheduler.pop_due(target)? {
            self.dispatch(task, &mut summary)?;
        }
        self.scheduler.advance_to(target);

        summary.now = self.scheduler.now();
        summary.bookings = BookingCounts::tally(self.city.bookings());
        summary.recommendation_count = self.twin.recommendations().len();
        Ok(summary)
    }

    /// Execute a single due task against the stores.
    fn dispatch(&mut self, task: Task, summary: &mut StepSummary) -> Result<(), StepError> {
        let now = self.scheduler.now();
        match task {
            Task::RefreshTwin => {
                if !self.twin.is_connected() {
                    debug!(now, "Twin disconnected, refresh skipped");
                    summary.skipped_refreshes = summary.skipped_refreshes.saturating_add(1);
                    return Ok(());
                }
                // Staleness check against the pre-refresh stamp: the
                // vitals update below would otherwise mask it.
                let stale = now.saturating_sub(self.twin.last_update())
                    > self.timers.environment_refresh_after;

                let vitals = self.sensors.sample_vitals(now);
                self.twin.update_vitals(vitals, now);
                summary.twin_refreshes = summary.twin_refreshes.saturating_add(1);

                if stale {
                    let environment = self.sensors.sample_environment(now);
                    self.twin.update_environment(environment, now);
                    summary.environment_refreshes =
                        summary.environment_refreshes.saturating_add(1);
                }
            }
            Task::AdvanceCityClock => {
                self.city.advance_time_of_day();
                summary.clock_advances = summary.clock_advances.saturating_add(1);
            }
            Task::BookingDeparture(id) => {
                if self.city.update_booking_status(id, BookingStatus::Enroute, now) {
                    summary.booking_transitions = summary.booking_transitions.saturating_add(1);
                    // Arrival timing starts when the trip departs.
                    let travel = self
                        .city
                        .booking(id)
                        .map_or(0, |booking| booking.estimated_time);
                    self.scheduler
                        .schedule_once(travel, Task::BookingArrival(id))?;
                }
            }
            Task::BookingArrival(id) => {
                if self.city.update_booking_status(id, BookingStatus::Arrived, now) {
                    summary.booking_transitions = summary.booking_transitions.saturating_add(1);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use symbiocity_types::MobilityMode;

    fn simulation() -> SimulationState {
        SimulationState::from_config(&SimulationConfig::default())
    }

    fn pod_request(estimated_time: u64) -> BookingRequest {
        BookingRequest {
            origin: String::from("A"),
            destination: String::from("B"),
            mode: MobilityMode::Pod,
            estimated_time,
        }
    }

    #[test]
    fn seeded_simulation_has_first_render_data() {
        let state = simulation();
        assert!(state.twin.twin().is_some());
        assert!(state.twin.vitals().is_some());
        assert!(!state.twin.recommendations().is_empty());
        assert_eq!(state.city.districts().len(), 4);
    }

    #[test]
    fn default_config_wires_default_periods() {
        let state = simulation();
        assert_eq!(state.timers.twin_refresh_period, 5);
        assert_eq!(state.timers.city_clock_period, 10);
        assert_eq!(state.timers.departure_delay, 2);
        assert_eq!(state.timers.environment_refresh_after, 30);
    }

    #[test]
    fn refresh_replaces_vitals_on_period() {
        let mut state = simulation();
        state.start_timers().unwrap();

        let before = state.twin.vitals().copied().unwrap();
        let summary = state.advance(5).unwrap();

        assert_eq!(summary.twin_refreshes, 1);
        let after = state.twin.vitals().copied().unwrap();
        assert_eq!(after.timestamp, 5);
        assert_ne!(before, after);
        assert_eq!(state.twin.last_update(), 5);
    }

    #[test]
    fn disconnected_twin_is_not_mutated() {
        let mut state = simulation();
        state.start_timers().unwrap();
        state.twin.set_connected(false);

        let before = state.twin.vitals().copied().unwrap();
        let summary = state.advance(20).unwrap();

        assert_eq!(summary.twin_refreshes, 0);
        assert_eq!(summary.skipped_refreshes, 4);
        assert_eq!(state.twin.vitals().copied().unwrap(), before);
        assert_eq!(state.twin.last_update(), 0);
    }

    #[test]
    fn stale_environment_refreshes_after_reconnect() {
        let mut state = simulation();
        state.start_timers().unwrap();

        // While connected, refreshes keep the data fresh, so the
        // environment sample never regenerates on its own.
        let summary = state.advance(25).unwrap();
        assert_eq!(summary.environment_refreshes, 0);
        let env_before = state.twin.environment().copied().unwrap();

        // A disconnect freezes last_update; reconnecting after the
        // staleness window forces an environment refresh too.
        state.twin.set_connected(false);
        let _ = state.advance(40).unwrap();
        state.twin.set_connected(true);
        let summary = state.advance(5).unwrap();

        assert_eq!(summary.environment_refreshes, 1);
        let env_after = state.twin.environment().copied().unwrap();
        assert_ne!(env_before, env_after);
    }

    #[test]
    fn timer_init_is_idempotent() {
        let mut state = simulation();
        for _ in 0..5 {
            state.start_timers().unwrap();
        }
        assert!(state.timers_started());

        // One refresh per period, not five.
        let summary = state.advance(5).unwrap();
        assert_eq!(summary.twin_refreshes, 1);
        let summary = state.advance(5).unwrap();
        assert_eq!(summary.twin_refreshes, 1);
    }

    #[test]
    fn city_clock_advances_every_ten_units() {
        let mut state = simulation();
        state.start_timers().unwrap();

        let start = state.city.environment().time_of_day;
        let summary = state.advance(30).unwrap();

        assert_eq!(summary.clock_advances, 3);
        let expected = (start + 0.3).rem_euclid(24.0);
        let got = state.city.environment().time_of_day;
        assert!((got - expected).abs() < 1e-9, "got {got}, expected {expected}");
    }

    #[test]
    fn city_clock_runs_while_disconnected() {
        let mut state = simulation();
        state.start_timers().unwrap();
        state.twin.set_connected(false);

        let summary = state.advance(20).unwrap();
        assert_eq!(summary.clock_advances, 2);
    }

    #[test]
    fn booking_walks_the_full_lifecycle() {
        let mut state = simulation();
        let id = state.book_mobility(pod_request(10)).unwrap();
        assert_eq!(state.city.booking(id).unwrap().status, BookingStatus::Scheduled);

        // Departure delay is 2 units.
        let _ = state.advance(2).unwrap();
        let booking = state.city.booking(id).unwrap();
        assert_eq!(booking.status, BookingStatus::Enroute);
        assert_eq!(booking.start_time, Some(2));

        // Still travelling one unit before arrival.
        let _ = state.advance(9).unwrap();
        assert_eq!(state.city.booking(id).unwrap().status, BookingStatus::Enroute);

        let _ = state.advance(1).unwrap();
        assert_eq!(state.city.booking(id).unwrap().status, BookingStatus::Arrived);
    }

    #[test]
    fn lifecycle_touches_only_its_own_booking() {
        let mut state = simulation();
        let fast = state.book_mobility(pod_request(1)).unwrap();
        let slow = state.book_mobility(pod_request(500)).unwrap();

        let summary = state.advance(3).unwrap();
        assert_eq!(state.city.booking(fast).unwrap().status, BookingStatus::Arrived);
        assert_eq!(state.city.booking(slow).unwrap().status, BookingStatus::Enroute);
        assert_eq!(summary.bookings.arrived, 1);
        assert_eq!(summary.bookings.enroute, 1);
        assert_eq!(summary.bookings.scheduled, 0);
    }

    #[test]
    fn cancelled_booking_never_departs() {
        let mut state = simulation();
        let id = state.book_mobility(pod_request(10)).unwrap();
        state
            .city
            .update_booking_status(id, BookingStatus::Cancelled, 0);

        let _ = state.advance(50).unwrap();
        assert_eq!(state.city.booking(id).unwrap().status, BookingStatus::Cancelled);
        assert!(state.city.booking(id).unwrap().start_time.is_none());
    }

    #[test]
    fn refresh_regenerates_recommendations() {
        let mut state = simulation();
        state.start_timers().unwrap();

        let summary = state.advance(5).unwrap();
        assert!(summary.recommendation_count >= 1);
        // The list always reflects the latest sample generation.
        assert_eq!(
            summary.recommendation_count,
            state.twin.recommendations().len()
        );
    }
}
