use log::warn;
use std::time::{Duration, Instant};

/// Paces the game loop at a fixed period measured on the monotonic clock
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    deadline: Instant,
}

impl Ticker {
    /// Start a ticker whose first tick falls one `period` from now
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker::starting_at(period, Instant::now())
    }

    fn starting_at(period: Duration, now: Instant) -> Ticker {
        Ticker {
            period,
            deadline: now + period,
        }
    }

    /// Sleep until the next tick
    pub(crate) fn wait(&mut self) {
        let now = Instant::now();
        let wait = self.deadline.saturating_duration_since(now);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.deadline = self.next_deadline(now.max(self.deadline));
    }

    /// The deadline following the current one, given that the current one was
    /// reached at `now`.  If the loop has fallen a whole period or more
    /// behind, the schedule restarts from `now` instead of catching up.
    fn next_deadline(&self, now: Instant) -> Instant {
        let next = self.deadline + self.period;
        if next <= now {
            warn!(
                "Tick overran by {:?}; rescheduling",
                now.saturating_duration_since(self.deadline)
            );
            now + self.period
        } else {
            next
        }
    }
}
