//! Time sources injected into the encounter worker.
//!
//! The core rules never read a clock. The worker samples one [`Clock`] per
//! command and derives the epoch day from it, so tests can drive time
//! explicitly with [`ManualClock`].

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use boss_core::{EpochContext, Timestamp};

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(chrono::Utc::now().timestamp())
    }
}

/// Settable clock shared between a test and the worker it drives.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    secs: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: Arc::new(AtomicI64::new(start.0)),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.secs.store(at.0, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        let delta = i64::try_from(secs).unwrap_or(i64::MAX);
        self.secs.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.secs.load(Ordering::SeqCst))
    }
}

/// Maps wall-clock instants to 1-based epoch day numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochCalendar {
    pub start: Timestamp,
}

impl EpochCalendar {
    const DAY_SECS: u64 = 24 * 3600;

    pub fn new(start: Timestamp) -> Self {
        Self { start }
    }

    /// Day 1 starts at `start`; instants before the epoch clamp to day 1.
    pub fn day(&self, now: Timestamp) -> u32 {
        let days = now.secs_since(self.start) / Self::DAY_SECS;
        u32::try_from(days).map_or(u32::MAX, |days| days.saturating_add(1))
    }

    pub fn context(&self, now: Timestamp) -> EpochContext {
        EpochContext::new(self.day(now), now)
    }
}
