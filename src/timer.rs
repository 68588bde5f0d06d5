//! Explicit timers owned by the session.
//!
//! Nothing here reads the wall clock on its own.  The driver loops on
//! `Scheduler::pop_due` with the current time, handling one expiry at a time
//! in chronological order, then calls `settle`.  `MonotonicClock` backs the
//! real game and `ManualClock` lets tests step time by hand.

use std::cell::Cell;
use std::time::{Duration, Instant};

// ── Clocks ────────────────────────────────────────────────────────────────────

/// Monotonic time elapsed since some fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

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

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Periodic enemy formation step.
    Formation,
    /// One-shot re-arm of the fire cooldown.
    FireRearm,
}

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new(now: Duration) -> Self {
        Scheduler {
            now,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.insert(kind, delay, None)
    }

    /// Fires every `period`, first at `now + period`.  A zero period is
    /// bumped to 1ms so a `pop_due` loop always terminates.
    pub fn schedule_every(&mut self, period: Duration, kind: TimerKind) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(kind, period, Some(period))
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Pop the earliest timer due at or before `now`, moving the scheduler's
    /// notion of time to its expiry.  Periodic timers are re-armed.
    /// Callers loop on this so handlers may cancel or add timers between
    /// expiries.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerKind> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.id.0))?;

        let timer = &mut self.timers[index];
        self.now = self.now.max(timer.due);
        let kind = timer.kind;
        match timer.period {
            Some(period) => timer.due += period,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(kind)
    }

    /// Mark time as having reached `now` once all due timers were handled.
    pub fn settle(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    fn insert(&mut self, kind: TimerKind, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            due: self.now + delay,
            period,
        });
        id
    }
}
