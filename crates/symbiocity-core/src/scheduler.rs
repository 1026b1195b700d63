//! Virtual-time scheduler.
//!
//! All periodic and deferred work in the simulation runs through this
//! single task queue. Time is a bare `u64` counter of virtual units; the
//! scheduler owns it and is the only authority that moves it forward.
//! Tests advance virtual time directly instead of waiting on wall-clock
//! timers, which makes every timing-dependent behavior deterministic.
//!
//! # Ordering
//!
//! Tasks execute in due-time order. Tasks due at the same instant
//! execute in the order they were scheduled (each entry carries a
//! monotonically increasing sequence number). Periodic tasks reinsert
//! themselves one period ahead after each execution, keeping their
//! original sequence number.
//!
//! # Design Principles
//!
//! - The virtual clock never moves backwards.
//! - All clock arithmetic is checked; running the city past `u64::MAX`
//!   units is an error, not a wrap.
//! - Tasks are data ([`Task`]), not closures: the dispatch lives with
//!   the simulation state, and the queue stays inspectable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use symbiocity_types::BookingId;

/// Errors that can occur during scheduling operations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The virtual clock would overflow `u64::MAX`.
    #[error("virtual clock overflow: cannot schedule beyond u64::MAX units")]
    ClockOverflow,

    /// A periodic task was given a zero period.
    #[error("invalid period: periodic tasks need a period of at least 1 unit")]
    InvalidPeriod,
}

/// A unit of deferred work owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Task {
    /// Refresh the twin's vital (and possibly environment) samples.
    RefreshTwin,
    /// Advance the city's time of day by one step.
    AdvanceCityClock,
    /// Transition a booking from scheduled to en route.
    BookingDeparture(BookingId),
    /// Transition a booking from en route to arrived.
    BookingArrival(BookingId),
}

/// A queued task with its due time and optional repeat period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    /// Virtual time at which the task becomes due.
    due: u64,
    /// Insertion sequence, for FIFO order among equal due times.
    seq: u64,
    /// The task to execute.
    task: Task,
    /// Repeat period for periodic tasks; `None` for one-shots.
    period: Option<u64>,
}

// BinaryHeap is a max-heap; invert the comparison so the earliest due
// time (then the lowest sequence number) surfaces first.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The single-threaded virtual-time task queue.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    /// Create an empty scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current virtual time.
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Number of queued entries (periodic tasks count once).
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule a one-shot task `delay` units from now. Returns the
    /// virtual time at which it will run.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ClockOverflow`] if the due time would
    /// exceed `u64::MAX`.
    pub fn schedule_once(&mut self, delay: u64, task: Task) -> Result<u64, SchedulerError> {
        let due = self
            .now
            .checked_add(delay)
            .ok_or(SchedulerError::ClockOverflow)?;
        let seq = self.take_seq()?;
        self.push(Entry {
            due,
            seq,
            task,
            period: None,
        });
        Ok(due)
    }

    /// Schedule a task to run every `period` units, first firing one
    /// period from now.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidPeriod`] for a zero period, or
    /// [`SchedulerError::ClockOverflow`] if the first due time would
    /// exceed `u64::MAX`.
    pub fn schedule_periodic(&mut self, period: u64, task: Task) -> Result<(), SchedulerError> {
        if period == 0 {
            return Err(SchedulerError::InvalidPeriod);
        }
        let due = self
            .now
            .checked_add(period)
            .ok_or(SchedulerError::ClockOverflow)?;
        let seq = self.take_seq()?;
        self.push(Entry {
            due,
            seq,
            task,
            period: Some(period),
        });
        Ok(())
    }

    /// Pop the next task due at or before `target`, moving the virtual
    /// clock to its due time. Periodic tasks are reinserted one period
    /// ahead before being returned.
    ///
    /// Returns `None` once nothing else is due by `target`; the caller
    /// should then seal the step with [`Self::advance_to`].
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ClockOverflow`] if reinserting a
    /// periodic task would overflow the clock.
    pub fn pop_due(&mut self, target: u64) -> Result<Option<Task>, SchedulerError> {
        let Some(head) = self.queue.peek() else {
            return Ok(None);
        };
        if head.due > target {
            return Ok(None);
        }
        // Invariant: peek() just succeeded, so pop() yields the entry.
        let Some(entry) = self.queue.pop() else {
            return Ok(None);
        };

        // Time only moves forward: a task scheduled "in the past"
        // (delay 0 races) executes at the current instant.
        self.now = self.now.max(entry.due);

        if let Some(period) = entry.period {
            let next_due = entry
                .due
                .checked_add(period)
                .ok_or(SchedulerError::ClockOverflow)?;
            // The reinsertion keeps its original sequence number, so
            // co-due periodic tasks always fire in the order they were
            // first scheduled.
            self.push(Entry {
                due: next_due,
                ..entry
            });
        }

        Ok(Some(entry.task))
    }

    /// Move the virtual clock forward to `target` after draining due
    /// tasks. Backward moves are ignored.
    pub const fn advance_to(&mut self, target: u64) {
        if target > self.now {
            self.now = target;
        }
    }

    fn push(&mut self, entry: Entry) {
        self.queue.push(entry);
    }

    fn take_seq(&mut self) -> Result<u64, SchedulerError> {
        let seq = self.next_seq;
        self.next_seq = self
            .next_seq
            .checked_add(1)
            .ok_or(SchedulerError::ClockOverflow)?;
        Ok(seq)
    }
}
