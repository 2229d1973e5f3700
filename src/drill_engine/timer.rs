//! Per-problem countdown and the clock that drives it.
//!
//! The engine never spawns timers. The owner of a [`Countdown`] feeds it
//! elapsed time, either directly through `tick(dt)` or by polling a
//! [`Clock`]. Tests use [`ManualClock`] to step time deterministically.

use std::cell::Cell;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Identifies one run of a countdown. A new handle is issued on every
/// start, and at most one is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// No live handle; nothing happened.
    Idle,
    Running(Duration),
    /// Reached zero on this tick. The handle has been released.
    Expired,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Duration,
    handle: Option<TimerHandle>,
    issued: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is running, then start a fresh run of `limit`.
    pub fn start(&mut self, limit: Duration) -> TimerHandle {
        self.cancel();
        self.remaining = limit;
        self.issue()
    }

    /// Restart from the time left on a paused countdown.
    /// No-op if already running or if nothing is left.
    pub fn resume(&mut self) -> Option<TimerHandle> {
        if self.handle.is_some() {
            return self.handle;
        }
        if self.remaining.is_zero() {
            return None;
        }
        Some(self.issue())
    }

    /// Stop without discarding the remaining time.
    pub fn pause(&mut self) {
        self.handle = None;
    }

    /// Stop and clear.
    pub fn cancel(&mut self) {
        self.handle = None;
        self.remaining = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn tick(&mut self, dt: Duration) -> CountdownTick {
        if self.handle.is_none() {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.handle = None;
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining)
        }
    }

    fn issue(&mut self) -> TimerHandle {
        self.issued += 1;
        let handle = TimerHandle(self.issued);
        self.handle = Some(handle);
        handle
    }
}

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn idle_countdown_ignores_ticks() {
        let mut c = Countdown::new();
        assert_eq!(c.tick(SEC), CountdownTick::Idle);
        assert_eq!(c.remaining(), Duration::ZERO);
    }

    #[test]
    fn restart_replaces_the_live_handle() {
        let mut c = Countdown::new();
        let first = c.start(SEC * 90);
        c.tick(SEC * 30);
        let second = c.start(SEC * 90);
        assert_ne!(first, second);
        assert_eq!(c.handle(), Some(second));
        assert_eq!(c.remaining(), SEC * 90);
    }

    #[test]
    fn expires_exactly_once() {
        let mut c = Countdown::new();
        c.start(SEC * 2);
        assert_eq!(c.tick(SEC), CountdownTick::Running(SEC));
        assert_eq!(c.tick(SEC * 5), CountdownTick::Expired);
        assert!(!c.is_running());
        assert_eq!(c.tick(SEC), CountdownTick::Idle);
    }

    #[test]
    fn pause_keeps_time_and_resume_continues() {
        let mut c = Countdown::new();
        c.start(SEC * 10);
        c.tick(SEC * 4);
        c.pause();
        assert_eq!(c.tick(SEC * 3), CountdownTick::Idle);
        assert!(c.resume().is_some());
        assert_eq!(c.tick(SEC), CountdownTick::Running(SEC * 5));
    }

    #[test]
    fn cancel_prevents_resume() {
        let mut c = Countdown::new();
        c.start(SEC * 10);
        c.cancel();
        assert_eq!(c.resume(), None);
    }

    #[test]
    fn manual_clock_advances_on_demand() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(SEC * 3);
        assert_eq!(clock.now(), SEC * 3);
    }
}
