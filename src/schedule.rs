use std::time::Instant;

/// Timers the game loop can have outstanding.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Timer {
    /// Next simulation step.
    Tick,
    /// Deferred start after a restart request.
    Start,
}

/// One-shot timers keyed by [`Timer`], polled by a single-threaded loop.
///
/// Scheduling a timer that is already pending replaces its deadline.
/// Cancelling guarantees the timer will not be returned by [`Schedule::pop_due`].
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    tick_at: Option<Instant>,
    start_at: Option<Instant>,
}

impl Schedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, timer: Timer, at: Instant) {
        *self.slot_mut(timer) = Some(at);
    }

    pub fn cancel(&mut self, timer: Timer) {
        *self.slot_mut(timer) = None;
    }

    #[must_use]
    pub fn is_scheduled(&self, timer: Timer) -> bool {
        self.deadline(timer).is_some()
    }

    #[must_use]
    pub fn deadline(&self, timer: Timer) -> Option<Instant> {
        match timer {
            Timer::Tick => self.tick_at,
            Timer::Start => self.start_at,
        }
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.tick_at, self.start_at) {
            (Some(tick), Some(start)) => Some(tick.min(start)),
            (tick, start) => tick.or(start),
        }
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Timer> {
        let due = [Timer::Start, Timer::Tick]
            .into_iter()
            .filter_map(|timer| self.deadline(timer).map(|at| (at, timer)))
            .filter(|&(at, _)| at <= now)
            .min_by_key(|&(at, _)| at)
            .map(|(_, timer)| timer)?;

        self.cancel(due);
        Some(due)
    }

    fn slot_mut(&mut self, timer: Timer) -> &mut Option<Instant> {
        match timer {
            Timer::Tick => &mut self.tick_at,
            Timer::Start => &mut self.start_at,
        }
    }
}
