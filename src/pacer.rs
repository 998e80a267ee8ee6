//! # Cycle Pacer
//!
//! Throttles execution to a wall-clock rate. Deadlines are absolute
//! (`origin + period × cycles charged so far`) so oversleeping on one instruction
//! is absorbed by the next ones instead of accumulating drift.
//!
//! With a zero period the pacer only counts. Changing the period restarts the
//! origin at the moment the new value is first seen.

use std::time::{Duration, Instant};

use crate::signals::Signals;
use crate::ExecutionError;

/// Real-time throttle for one run loop.
#[derive(Debug, Clone)]
pub struct Pacer {
    origin: Instant,
    cycles: u64,
    period_ns: u64,
}

impl Pacer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            cycles: 0,
            period_ns: 0,
        }
    }

    /// Restarts the deadline origin at the current instant.
    pub fn restart(&mut self) {
        self.origin = Instant::now();
        self.cycles = 0;
    }

    /// Accounts for `cycles` more cycles and sleeps until their deadline.
    ///
    /// A cancelled sleep is fatal and reported as `WaitCancelled`.
    pub fn charge(&mut self, cycles: u64, signals: &Signals) -> Result<(), ExecutionError> {
        let period_ns = signals.cycle_period_ns();
        if period_ns != self.period_ns {
            self.period_ns = period_ns;
            self.restart();
        }
        if period_ns == 0 {
            return Ok(());
        }

        self.cycles = self.cycles.saturating_add(cycles);
        let elapsed = Duration::from_nanos(period_ns.saturating_mul(self.cycles));
        match self.origin.checked_add(elapsed) {
            Some(deadline) => signals.sleep_until(deadline),
            None => Ok(()),
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}
