//! # Waiting for a Stable Source
//!
//! Before a pass, the poller checks the source every `interval`:
//!
//! - the item count is read and compared with the previous check;
//! - the source is done once it reports [`OutlineSource::is_stable`] and the
//!   count has not grown for `stable_checks` consecutive checks;
//! - after `max_checks` checks it gives up and the pass proceeds with whatever
//!   is materialized.
//!
//! Sleeping goes through [`Sleeper`] so tests never wait on the clock.

use super::OutlineSource;
use crate::error::Result;
use std::time::Duration;
use tracing::{trace, warn};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_STABLE_CHECKS: u32 = 1;
pub const DEFAULT_MAX_CHECKS: u32 = 20;

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Stable { checks: u32, items: usize },
    Exhausted { checks: u32, items: usize },
}

impl PollOutcome {
    pub fn is_stable(&self) -> bool {
        matches!(self, PollOutcome::Stable { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityPoller {
    interval: Duration,
    stable_checks: u32,
    max_checks: u32,
}

impl Default for StabilityPoller {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, DEFAULT_STABLE_CHECKS, DEFAULT_MAX_CHECKS)
    }
}

impl StabilityPoller {
    /// Zero counts are raised to one.
    pub fn new(interval: Duration, stable_checks: u32, max_checks: u32) -> Self {
        Self {
            interval,
            stable_checks: stable_checks.max(1),
            max_checks: max_checks.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stable_checks(&self) -> u32 {
        self.stable_checks
    }

    pub fn max_checks(&self) -> u32 {
        self.max_checks
    }

    pub fn wait<S>(&self, source: &S, sleeper: &dyn Sleeper) -> Result<PollOutcome>
    where
        S: OutlineSource + ?Sized,
    {
        let mut last_count: Option<usize> = None;
        let mut unchanged = 0u32;
        let mut items = 0usize;

        for check in 1..=self.max_checks {
            items = source.item_count()?;
            unchanged = match last_count {
                Some(last) if items <= last => unchanged + 1,
                _ => 1,
            };
            last_count = Some(items);
            trace!(check, items, unchanged, "polled source");

            if unchanged >= self.stable_checks && source.is_stable() {
                return Ok(PollOutcome::Stable {
                    checks: check,
                    items,
                });
            }
            if check < self.max_checks {
                sleeper.sleep(self.interval);
            }
        }

        warn!(
            checks = self.max_checks,
            items, "source did not settle, continuing with what is loaded"
        );
        Ok(PollOutcome::Exhausted {
            checks: self.max_checks,
            items,
        })
    }
}
