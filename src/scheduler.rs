//! Gravity timer
//!
//! A single repeating timer. The caller feeds it wall-clock time and it reports
//! how many gravity ticks are due. Changing the period re-arms the timer.

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Time accumulated towards the next firing
    pending: Duration,
    /// Period the pending time was accumulated under
    period: Option<Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any accumulated time (pause, replay)
    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
        self.period = None;
    }

    /// Add elapsed time under the given period and return whether a tick is due.
    /// Call [`Scheduler::fire`] once per due tick.
    pub fn feed(&mut self, elapsed: Duration, period: Duration) -> bool {
        if self.period != Some(period) {
            self.pending = Duration::ZERO;
            self.period = Some(period);
        }
        self.pending += elapsed;
        self.is_due()
    }

    /// Whether a full period has accumulated
    pub fn is_due(&self) -> bool {
        match self.period {
            Some(period) => self.pending >= period,
            None => false,
        }
    }

    /// Consume one period of accumulated time
    pub fn fire(&mut self) {
        if let Some(period) = self.period {
            self.pending = self.pending.saturating_sub(period);
        }
    }

    /// Time left until the next tick under the current period
    pub fn remaining(&self) -> Option<Duration> {
        self.period.map(|period| period.saturating_sub(self.pending))
    }
}
