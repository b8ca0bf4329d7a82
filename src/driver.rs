//! Pacing for the two periodic drivers of a match: physics at the configured tick
//! period and the match clock at 1 Hz.
//!
//! Time is always passed in by the caller so the schedule can be replayed in tests.

use std::time::{Duration, Instant};

use crate::{
    clock::MatchSummary,
    match_state::{MatchState, Side},
};

/// Most physics ticks run by one [`MatchDriver::poll`]. A longer stall (window
/// resize, suspended process) drops the backlog instead of fast-forwarding the ball.
pub const MAX_CATCH_UP_TICKS: u32 = 10;

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Fixed-rate schedule: counts the periods elapsed since the last call.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate {
    period: Duration,
    next_due: Instant,
}

impl FixedRate {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next_due: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of periods that elapsed up to `now`, at most `limit`. When more were due
    /// than allowed, the schedule restarts from `now`.
    pub fn due(&mut self, now: Instant, limit: u32) -> u32 {
        let mut count = 0;
        while now >= self.next_due {
            if count == limit {
                log::warn!(
                    "Dropping a backlog of ticks, {:?} late.",
                    now.saturating_duration_since(self.next_due)
                );
                self.next_due = now + self.period;
                break;
            }
            count += 1;
            self.next_due += self.period;
        }
        count
    }

    pub fn reset(&mut self, now: Instant) {
        self.next_due = now + self.period;
    }
}

/// Ticks owed to each driver at a given instant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DueTicks {
    pub physics: u32,
    pub clock: u32,
}

/// What happened during one [`MatchDriver::advance`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Advance {
    pub scored: Vec<Side>,
    pub summary: Option<MatchSummary>,
}

impl Advance {
    pub fn changed(&self) -> bool {
        !self.scored.is_empty() || self.summary.is_some()
    }
}

/// Runs both periodic drivers against one [`MatchState`]. The drivers are suspended
/// when the match ends and resumed with [`MatchDriver::resume`] after a restart.
#[derive(Debug, Clone)]
pub struct MatchDriver {
    physics: FixedRate,
    clock: FixedRate,
    suspended: bool,
}

impl MatchDriver {
    pub fn new(tick_period: Duration, start: Instant) -> Self {
        Self {
            physics: FixedRate::new(tick_period, start),
            clock: FixedRate::new(CLOCK_PERIOD, start),
            suspended: false,
        }
    }

    pub fn for_match(state: &MatchState, start: Instant) -> Self {
        Self::new(state.config().tick_period, start)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Restart both schedules from `now`. Time spent suspended is not owed.
    pub fn resume(&mut self, now: Instant) {
        self.physics.reset(now);
        self.clock.reset(now);
        self.suspended = false;
    }

    pub fn poll(&mut self, now: Instant) -> DueTicks {
        if self.suspended {
            return DueTicks::default();
        }
        DueTicks {
            physics: self.physics.due(now, MAX_CATCH_UP_TICKS),
            // a late clock still owes every second, the match length is wall time
            clock: self.clock.due(now, u32::MAX),
        }
    }

    /// Run every tick due at `now`: physics first, then the clock. Suspends the
    /// drivers when the clock ends the match.
    pub fn advance(&mut self, state: &mut MatchState, now: Instant) -> Advance {
        let due = self.poll(now);
        let mut advance = Advance::default();

        for _ in 0..due.physics {
            if let Some(side) = state.tick_physics() {
                advance.scored.push(side);
            }
        }
        for _ in 0..due.clock {
            if let Some(summary) = state.tick_clock() {
                advance.summary = Some(summary);
                self.suspend();
                break;
            }
        }
        advance
    }
}
