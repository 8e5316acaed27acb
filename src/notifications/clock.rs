// SPDX-License-Identifier: MPL-2.0
//! Time sources for the notification manager.
//!
//! The manager never reads the system time directly. It asks a [`Clock`],
//! which lets tests drive timers with a [`ManualClock`] instead of
//! sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Monotonic system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one clone and hand
/// another to the manager.
///
/// ```
/// use toast_queue::notifications::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let shared = clock.clone();
/// let start = shared.now();
///
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(shared.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Moves time forward for every clone of this clock.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Returns how much virtual time has passed since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
