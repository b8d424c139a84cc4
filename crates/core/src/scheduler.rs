//! Polling scheduler
//!
//! A pure state machine deciding when the next fetch happens. It never
//! performs I/O itself: every transition returns the [`Effect`] the runtime
//! should carry out (spawn a fetch, arm a timer).
//!
//! The wait before the next fetch starts when the previous fetch has been
//! published, so fetches never overlap.

use std::time::Duration;
use tracing::debug;

/// Side effect requested by the event loop's reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a snapshot off the main loop and post the result back
    Fetch,
    /// Post `Event::Tick { generation }` after `delay`
    ScheduleTick { generation: u64, delay: Duration },
    /// Leave the event loop
    Exit,
}

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started yet
    Idle,
    /// A fetch is in flight
    Fetching,
    /// Waiting for the armed timer
    Waiting,
    /// Quit was requested; terminal
    Cancelled,
}

/// Fixed-cadence fetch scheduler
#[derive(Debug, Clone)]
pub struct PollingScheduler {
    interval: Duration,
    phase: Phase,
    /// Identifies the currently armed timer; ticks carrying an older value are stale
    generation: u64,
}

impl PollingScheduler {
    /// Create an idle scheduler
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    /// Issue the first fetch immediately
    pub fn start(&mut self) -> Option<Effect> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.phase = Phase::Fetching;
        Some(Effect::Fetch)
    }

    /// A timer fired; fetch if it is the timer we are waiting for
    pub fn on_tick(&mut self, generation: u64) -> Option<Effect> {
        if self.phase != Phase::Waiting || generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                phase = ?self.phase,
                "Ignoring stale tick"
            );
            return None;
        }
        self.phase = Phase::Fetching;
        Some(Effect::Fetch)
    }

    /// The in-flight fetch finished; arm the timer for the next one
    ///
    /// Returns `None` when cancelled, meaning the result must be discarded.
    pub fn on_fetch_complete(&mut self) -> Option<Effect> {
        if self.phase != Phase::Fetching {
            return None;
        }
        self.arm()
    }

    /// Fetch now, out of cadence
    ///
    /// Only honoured while waiting; a fetch already in flight is not
    /// duplicated. The pending timer is invalidated so the cadence restarts
    /// from this fetch's completion.
    pub fn request_refresh(&mut self) -> Option<Effect> {
        if self.phase != Phase::Waiting {
            return None;
        }
        self.generation += 1;
        self.phase = Phase::Fetching;
        Some(Effect::Fetch)
    }

    /// Stop scheduling; returns `false` if already cancelled
    pub fn cancel(&mut self) -> bool {
        if self.phase == Phase::Cancelled {
            return false;
        }
        self.phase = Phase::Cancelled;
        true
    }

    fn arm(&mut self) -> Option<Effect> {
        self.generation += 1;
        self.phase = Phase::Waiting;
        Some(Effect::ScheduleTick {
            generation: self.generation,
            delay: self.interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(1000);

    fn tick_generation(effect: Option<Effect>) -> u64 {
        match effect {
            Some(Effect::ScheduleTick { generation, delay }) => {
                assert_eq!(delay, INTERVAL);
                generation
            }
            other => panic!("expected ScheduleTick, got {other:?}"),
        }
    }

    #[test]
    fn test_start_fetches_immediately() {
        let mut scheduler = PollingScheduler::new(INTERVAL);
        assert_eq!(scheduler.phase(), Phase::Idle);

        assert_eq!(scheduler.start(), Some(Effect::Fetch));
        assert_eq!(scheduler.phase(), Phase::Fetching);

        // starting twice does nothing
        assert_eq!(scheduler.start(), None);
    }

    #[test]
    fn test_cycle_waits_after_completion() {
        let mut scheduler = PollingScheduler::new(INTERVAL);
        scheduler.start();

        let generation = tick_generation(scheduler.on_fetch_complete());
        assert_eq!(scheduler.phase(), Phase::Waiting);

        assert_eq!(scheduler.on_tick(generation), Some(Effect::Fetch));
        assert_eq!(scheduler.phase(), Phase::Fetching);

        let next = tick_generation(scheduler.on_fetch_complete());
        assert!(next > generation);
    }

    #[test]
    fn test_tick_while_fetching_is_ignored() {
        let mut scheduler = PollingScheduler::new(INTERVAL);
        scheduler.start();
        assert_eq!(scheduler.on_tick(scheduler.generation()), None);
        assert_eq!(scheduler.phase(), Phase::Fetching);
    }

    #[test]
    fn test_manual_refresh_invalidates_pending_tick() {
        let mut scheduler = PollingScheduler::new(INTERVAL);
        scheduler.start();
        let old = tick_generation(scheduler.on_fetch_complete());

        assert_eq!(scheduler.request_refresh(), Some(Effect::Fetch));

        // the timer armed before the refresh must not trigger another fetch
        assert_eq!(scheduler.on_tick(old), None);

        let new = tick_generation(scheduler.on_fetch_complete());
        assert_ne!(new, old);
        assert_eq!(scheduler.on_tick(new), Some(Effect::Fetch));
    }

    #[test]
    fn test_manual_refresh_during_fetch_does_not_overlap() {
        let mut scheduler = PollingScheduler::new(INTERVAL);
        scheduler.start();
        assert_eq!(scheduler.request_refresh(), None);
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut scheduler = PollingScheduler::new(INTERVAL);
        scheduler.start();
        let generation = scheduler.generation();

        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());
        assert!(scheduler.is_cancelled());

        assert_eq!(scheduler.on_fetch_complete(), None);
        assert_eq!(scheduler.on_tick(generation), None);
        assert_eq!(scheduler.request_refresh(), None);
        assert_eq!(scheduler.start(), None);
    }
}
