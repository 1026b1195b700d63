//! The city-side state container.
//!
//! [`CityState`] owns the district set, the mobility booking list, the
//! city environment, and the session toggles (current district, player
//! position, VR mode, simulation speed). Like the twin container it is
//! an explicit handle passed to whoever needs it -- never a global.
//!
//! Mutations are total: operations on unknown district, activity, or
//! booking IDs degrade to silent no-ops (logged at debug level) rather
//! than errors. Booking status transitions are requested here but
//! scheduled by the virtual-time scheduler in `symbiocity-core`.

use tracing::debug;

use symbiocity_types::{
    BookingId, BookingRequest, BookingStatus, CityEnvironment, CityEnvironmentPatch, District,
    MobilityBooking, Position, Weather,
};

use crate::seed_city;

/// Fraction of an hour added to the city clock per advance, before the
/// simulation-speed multiplier.
const TIME_OF_DAY_STEP: f64 = 0.1;

/// Mutable city-side state for one session.
#[derive(Debug, Clone)]
pub struct CityState {
    districts: Vec<District>,
    current_district: String,
    player_position: Position,
    environment: CityEnvironment,
    bookings: Vec<MobilityBooking>,
    vr_mode: bool,
    simulation_speed: f64,
}

impl CityState {
    /// Create the seed city: four districts, a mid-afternoon sunny sky,
    /// the player at home, and no bookings.
    pub fn seeded(now: u64) -> Self {
        Self {
            districts: seed_city::starting_districts(now),
            current_district: String::from("home"),
            player_position: [0.0, 2.0, 0.0],
            environment: CityEnvironment {
                time_of_day: 14.5,
                weather: Weather::Sunny,
                temperature: 22.0,
                wind: 0.3,
                ambient_lighting: 0.8,
            },
            bookings: Vec::new(),
            vr_mode: false,
            simulation_speed: 1.0,
        }
    }

    // -----------------------------------------------------------------------
    // Session toggles
    // -----------------------------------------------------------------------

    /// Move focus to a district. The slug is not validated; an unknown
    /// slug simply means no district matches the current selection.
    pub fn set_current_district(&mut self, district_id: impl Into<String>) {
        self.current_district = district_id.into();
    }

    /// Replace the player position.
    pub const fn set_player_position(&mut self, position: Position) {
        self.player_position = position;
    }

    /// Flip the VR mode flag.
    pub const fn toggle_vr_mode(&mut self) {
        self.vr_mode = !self.vr_mode;
    }

    /// Set the simulation speed multiplier applied to the city clock.
    pub const fn set_simulation_speed(&mut self, speed: f64) {
        self.simulation_speed = speed;
    }

    // -----------------------------------------------------------------------
    // Environment
    // -----------------------------------------------------------------------

    /// Shallow-merge a patch into the city environment.
    pub fn update_environment(&mut self, patch: &CityEnvironmentPatch) {
        patch.apply_to(&mut self.environment);
    }

    /// Advance the city clock by one step: `0.1 * simulation_speed`
    /// hours, wrapping at 24. Runs on its own periodic task regardless
    /// of twin connectivity.
    pub fn advance_time_of_day(&mut self) {
        // Hours are bounded floats; wraparound is handled below.
        #[allow(clippy::arithmetic_side_effects)]
        let advanced = self.environment.time_of_day + TIME_OF_DAY_STEP * self.simulation_speed;
        self.environment.time_of_day = advanced.rem_euclid(24.0);
    }

    // -----------------------------------------------------------------------
    // Mobility
    // -----------------------------------------------------------------------

    /// Create a booking from a request: fresh unique ID, status
    /// [`BookingStatus::Scheduled`], booked at `now`. Appends to the
    /// booking list and returns the new ID.
    ///
    /// The deferred departure/arrival transitions are the scheduler's
    /// responsibility; this method only records the booking.
    pub fn book_mobility(&mut self, request: BookingRequest, now: u64) -> BookingId {
        let id = BookingId::new();
        debug!(
            booking_id = %id,
            origin = request.origin,
            destination = request.destination,
            mode = ?request.mode,
            "Mobility booked"
        );
        self.bookings.push(MobilityBooking {
            id,
            origin: request.origin,
            destination: request.destination,
            mode: request.mode,
            status: BookingStatus::Scheduled,
            estimated_time: request.estimated_time,
            booked_at: now,
            start_time: None,
        });
        id
    }

    /// Update the status of the matching booking in place.
    ///
    /// Returns `true` if a booking changed. Unknown IDs and bookings
    /// already in a terminal state are left untouched (`false`), never
    /// an error -- deferred transitions may outlive their booking's
    /// relevance and must be silently ignorable.
    ///
    /// Entering [`BookingStatus::Enroute`] stamps the departure time.
    pub fn update_booking_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
        now: u64,
    ) -> bool {
        let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) else {
            debug!(booking_id = %id, "Status update for unknown booking ignored");
            return false;
        };
        if booking.status.is_terminal() {
            debug!(
                booking_id = %id,
                status = ?booking.status,
                "Status update for completed booking ignored"
            );
            return false;
        }
        if status == BookingStatus::Enroute && booking.start_time.is_none() {
            booking.start_time = Some(now);
        }
        booking.status = status;
        true
    }

    // -----------------------------------------------------------------------
    // Activities
    // -----------------------------------------------------------------------

    /// Add one participant to the matching activity.
    ///
    /// Returns `true` if the counter changed. Unknown district or
    /// activity slugs are silent no-ops. The nominal capacity is NOT
    /// enforced; `spots_remaining` saturates at zero so a full activity
    /// still renders sensibly.
    pub fn join_activity(&mut self, district_id: &str, activity_id: &str) -> bool {
        let Some(district) = self.districts.iter_mut().find(|d| d.id == district_id) else {
            debug!(district_id, "Join for unknown district ignored");
            return false;
        };
        let Some(activity) = district
            .activities
            .iter_mut()
            .find(|a| a.id == activity_id)
        else {
            debug!(district_id, activity_id, "Join for unknown activity ignored");
            return false;
        };
        activity.current_participants = activity.current_participants.saturating_add(1);
        true
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// All districts, in seed order.
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Look up a district by slug.
    pub fn district(&self, district_id: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.id == district_id)
    }

    /// The currently focused district slug.
    pub fn current_district(&self) -> &str {
        &self.current_district
    }

    /// The player's position in city space.
    pub const fn player_position(&self) -> Position {
        self.player_position
    }

    /// The city environment snapshot.
    pub const fn environment(&self) -> &CityEnvironment {
        &self.environment
    }

    /// All bookings made this session, oldest first.
    pub fn bookings(&self) -> &[MobilityBooking] {
        &self.bookings
    }

    /// Look up a booking by ID.
    pub fn booking(&self, id: BookingId) -> Option<&MobilityBooking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Whether VR mode is on.
    pub const fn is_vr_mode(&self) -> bool {
        self.vr_mode
    }

    /// The simulation speed multiplier.
    pub const fn simulation_speed(&self) -> f64 {
        self.simulation_speed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use symbiocity_types::MobilityMode;

    fn pod_request() -> BookingRequest {
        BookingRequest {
            origin: String::from("home"),
            destination: String::from("office"),
            mode: MobilityMode::Pod,
            estimated_time: 10,
        }
    }

    #[test]
    fn seeded_city_defaults() {
        let city = CityState::seeded(0);
        assert_eq!(city.districts().len(), 4);
        assert_eq!(city.current_district(), "home");
        assert_eq!(city.player_position(), [0.0, 2.0, 0.0]);
        assert_eq!(city.environment().time_of_day, 14.5);
        assert!(city.bookings().is_empty());
        assert!(!city.is_vr_mode());
        assert_eq!(city.simulation_speed(), 1.0);
    }

    #[test]
    fn booking_starts_scheduled() {
        let mut city = CityState::seeded(0);
        let id = city.book_mobility(pod_request(), 7);

        let booking = city.booking(id).unwrap();
        assert_eq!(booking.status, BookingStatus::Scheduled);
        assert_eq!(booking.booked_at, 7);
        assert_eq!(booking.estimated_time, 10);
        assert!(booking.start_time.is_none());
    }

    #[test]
    fn booking_ids_are_unique_per_call() {
        let mut city = CityState::seeded(0);
        let a = city.book_mobility(pod_request(), 0);
        let b = city.book_mobility(pod_request(), 0);
        assert_ne!(a, b);
        assert_eq!(city.bookings().len(), 2);
    }

    #[test]
    fn status_update_stamps_departure() {
        let mut city = CityState::seeded(0);
        let id = city.book_mobility(pod_request(), 0);

        assert!(city.update_booking_status(id, BookingStatus::Enroute, 2));
        let booking = city.booking(id).unwrap();
        assert_eq!(booking.status, BookingStatus::Enroute);
        assert_eq!(booking.start_time, Some(2));
    }

    #[test]
    fn terminal_bookings_are_frozen() {
        let mut city = CityState::seeded(0);
        let id = city.book_mobility(pod_request(), 0);
        assert!(city.update_booking_status(id, BookingStatus::Cancelled, 1));

        // Late transitions (e.g. a stale timer) must not resurrect it.
        assert!(!city.update_booking_status(id, BookingStatus::Enroute, 2));
        assert_eq!(city.booking(id).unwrap().status, BookingStatus::Cancelled);
    }

    #[test]
    fn unknown_booking_update_is_a_noop() {
        let mut city = CityState::seeded(0);
        let before = city.clone();
        assert!(!city.update_booking_status(BookingId::new(), BookingStatus::Arrived, 0));
        assert_eq!(city.bookings().len(), before.bookings().len());
    }

    #[test]
    fn status_update_touches_only_the_matching_booking() {
        let mut city = CityState::seeded(0);
        let first = city.book_mobility(pod_request(), 0);
        let second = city.book_mobility(pod_request(), 0);

        city.update_booking_status(first, BookingStatus::Enroute, 1);
        assert_eq!(city.booking(first).unwrap().status, BookingStatus::Enroute);
        assert_eq!(
            city.booking(second).unwrap().status,
            BookingStatus::Scheduled
        );
    }

    #[test]
    fn join_activity_increments_exactly_one_counter() {
        let mut city = CityState::seeded(0);
        let before: Vec<(String, String, u32)> = city
            .districts()
            .iter()
            .flat_map(|d| {
                d.activities
                    .iter()
                    .map(|a| (d.id.clone(), a.id.clone(), a.current_participants))
            })
            .collect();

        assert!(city.join_activity("office", "meeting"));

        for (district_id, activity_id, count) in before {
            let district = city.district(&district_id).unwrap();
            let activity = district
                .activities
                .iter()
                .find(|a| a.id == activity_id)
                .unwrap();
            if district_id == "office" && activity_id == "meeting" {
                assert_eq!(activity.current_participants, count.saturating_add(1));
            } else {
                assert_eq!(activity.current_participants, count);
            }
        }
    }

    #[test]
    fn join_unknown_ids_changes_nothing() {
        let mut city = CityState::seeded(0);
        let before = city.clone();

        assert!(!city.join_activity("nonexistent", "meeting"));
        assert!(!city.join_activity("office", "nonexistent"));
        assert_eq!(city.districts(), before.districts());
    }

    #[test]
    fn capacity_is_not_enforced_on_join() {
        let mut city = CityState::seeded(0);
        // "sleep" has capacity 1; join it twice anyway.
        assert!(city.join_activity("home", "sleep"));
        assert!(city.join_activity("home", "sleep"));

        let sleep = city
            .district("home")
            .unwrap()
            .activities
            .iter()
            .find(|a| a.id == "sleep")
            .unwrap();
        assert_eq!(sleep.current_participants, 2);
        assert_eq!(sleep.spots_remaining(), 0);
    }

    #[test]
    fn time_of_day_advances_and_wraps() {
        let mut city = CityState::seeded(0);
        city.update_environment(&CityEnvironmentPatch {
            time_of_day: Some(23.95),
            ..CityEnvironmentPatch::default()
        });
        city.advance_time_of_day();
        let hour = city.environment().time_of_day;
        assert!(hour < 0.1, "clock should wrap past midnight, got {hour}");
    }

    #[test]
    fn simulation_speed_scales_the_clock() {
        let mut city = CityState::seeded(0);
        city.update_environment(&CityEnvironmentPatch {
            time_of_day: Some(0.0),
            ..CityEnvironmentPatch::default()
        });
        city.set_simulation_speed(5.0);
        city.advance_time_of_day();
        assert!((city.environment().time_of_day - 0.5).abs() < 1e-9);
    }

    #[test]
    fn vr_mode_toggles() {
        let mut city = CityState::seeded(0);
        city.toggle_vr_mode();
        assert!(city.is_vr_mode());
        city.toggle_vr_mode();
        assert!(!city.is_vr_mode());
    }
}
