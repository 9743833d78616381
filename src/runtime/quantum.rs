/*!
 * Time Quantum Policy
 * Checkpoint yield decisions and per-context running-time accounting
 */

use crate::core::limits::DEFAULT_LATENCY;
use nix::time::{clock_gettime, ClockId};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::warn;

/// Clock used to measure how long a context has been running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClockSource {
    /// Wall-clock time since the scheduler started
    #[default]
    Monotonic,
    /// CPU time consumed by the whole process
    ProcessCpu,
}

impl ClockSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::ProcessCpu => "process_cpu",
        }
    }
}

/// Quantum configuration supplied at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumConfig {
    /// Running time after which a checkpoint yields
    pub latency: Duration,
    pub clock: ClockSource,
}

impl QuantumConfig {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            clock: ClockSource::default(),
        }
    }

    pub fn from_micros(micros: u64) -> Self {
        Self::new(Duration::from_micros(micros))
    }

    /// Yield at every checkpoint (worst-case interleaving)
    pub fn every_checkpoint() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }

    /// Whether a context that has run for `elapsed` must yield
    #[inline]
    pub fn is_due(&self, elapsed: Duration) -> bool {
        elapsed >= self.latency
    }
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

/// Time source shared by all contexts of one scheduler
///
/// Readings are offsets, only meaningful relative to each other.
#[derive(Debug, Clone)]
pub struct Clock {
    source: ClockSource,
    origin: Instant,
}

impl Clock {
    pub fn new(source: ClockSource) -> Self {
        Self {
            source,
            origin: Instant::now(),
        }
    }

    pub fn source(&self) -> ClockSource {
        self.source
    }

    /// Current reading
    pub fn now(&self) -> Duration {
        match self.source {
            ClockSource::Monotonic => self.origin.elapsed(),
            ClockSource::ProcessCpu => match clock_gettime(ClockId::CLOCK_PROCESS_CPUTIME_ID) {
                Ok(ts) => Duration::new(ts.tv_sec() as u64, ts.tv_nsec() as u32),
                Err(e) => {
                    warn!(error = %e, "process CPU clock unavailable, using monotonic time");
                    self.origin.elapsed()
                }
            },
        }
    }
}

/// Quantum bookkeeping of one context
///
/// Each context keeps its own slice start, so quanta are independent of
/// how long peers ran.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantumAccount {
    slice_start: Duration,
    running: Duration,
}

impl QuantumAccount {
    /// Start a new slice (called whenever the context is resumed)
    pub fn begin_slice(&mut self, now: Duration) {
        self.slice_start = now;
    }

    /// Time spent in the current slice
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.slice_start)
    }

    /// Add the current slice to the running total
    pub fn charge(&mut self, now: Duration) {
        self.running += self.elapsed(now);
        self.slice_start = now;
    }

    /// Cumulative running time
    pub fn running(&self) -> Duration {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_at_budget() {
        let quantum = QuantumConfig::from_micros(100);
        assert!(!quantum.is_due(Duration::from_micros(99)));
        assert!(quantum.is_due(Duration::from_micros(100)));
        assert!(QuantumConfig::every_checkpoint().is_due(Duration::ZERO));
    }

    #[test]
    fn test_account_charges_slices() {
        let mut account = QuantumAccount::default();
        account.begin_slice(Duration::from_micros(10));
        assert_eq!(account.elapsed(Duration::from_micros(25)), Duration::from_micros(15));

        account.charge(Duration::from_micros(25));
        account.begin_slice(Duration::from_micros(40));
        account.charge(Duration::from_micros(45));

        assert_eq!(account.running(), Duration::from_micros(20));
    }

    #[test]
    fn test_clock_is_monotonic() {
        for source in [ClockSource::Monotonic, ClockSource::ProcessCpu] {
            let clock = Clock::new(source);
            let a = clock.now();
            let b = clock.now();
            assert!(b >= a);
        }
    }
}
