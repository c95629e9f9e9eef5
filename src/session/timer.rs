//! One-shot turn timers.
//!
//! The session never blocks on a delay. It arms a deadline, keeps the
//! handle, and learns that the deadline passed when the host next polls.
//! [`MonotonicTimer`] runs on the system clock. [`ManualTimer`] runs on a
//! virtual clock that tests advance by hand, which keeps timing-sensitive
//! tests instant and deterministic.

use std::time::{Duration, Instant};

/// Identifies one armed deadline. Handles are never reused within a timer's
/// lifetime, so a stale handle simply reads as "not due".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerHandle(u64);

/// A source of cancellable one-shot deadlines.
pub trait Timer {
    /// Arms a deadline `delay` from now and returns its handle.
    fn set(&mut self, delay: Duration) -> TimerHandle;

    /// Disarms the deadline if it is still armed.
    fn cancel(&mut self, handle: TimerHandle);

    /// True once the deadline has passed, unless it was cancelled.
    fn is_due(&self, handle: TimerHandle) -> bool;
}

/// Deadline timer backed by the system's monotonic clock.
#[derive(Debug, Default)]
pub struct MonotonicTimer {
    armed: Vec<(TimerHandle, Instant)>,
    next_id: u64,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for MonotonicTimer {
    fn set(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.armed.push((handle, Instant::now() + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.armed.retain(|(armed_handle, _)| *armed_handle != handle);
    }

    fn is_due(&self, handle: TimerHandle) -> bool {
        self.armed
            .iter()
            .any(|(armed_handle, deadline)| *armed_handle == handle && *deadline <= Instant::now())
    }
}

/// A scheduling event recorded by [`ManualTimer`], in call order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerEvent {
    Set(TimerHandle),
    Cancel(TimerHandle),
}

/// Deadline timer on a virtual clock, advanced explicitly. Keeps a log of
/// effective set and cancel calls so tests can assert on scheduling order.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    armed: Vec<(TimerHandle, Duration)>,
    next_id: u64,
    events: Vec<TimerEvent>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the virtual clock forward.
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }

    /// How many deadlines are currently armed.
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Every set and every cancel that disarmed something, oldest first.
    pub fn events(&self) -> &[TimerEvent] {
        &self.events
    }
}

impl Timer for ManualTimer {
    fn set(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.armed.push((handle, self.now + delay));
        self.events.push(TimerEvent::Set(handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let before = self.armed.len();
        self.armed.retain(|(armed_handle, _)| *armed_handle != handle);
        if self.armed.len() < before {
            self.events.push(TimerEvent::Cancel(handle));
        }
    }

    fn is_due(&self, handle: TimerHandle) -> bool {
        self.armed
            .iter()
            .any(|(armed_handle, deadline)| *armed_handle == handle && *deadline <= self.now)
    }
}
