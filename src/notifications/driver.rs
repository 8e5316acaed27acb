// SPDX-License-Identifier: MPL-2.0
//! Tokio timer driver for the global notification queue.
//!
//! The driver sleeps until the earliest pending deadline, then fires due
//! timers through [`global::tick`]. Every mutation of the global queue
//! wakes it so newly armed timers are picked up. It must run on the same
//! thread as the UI code, e.g. via `Runtime::block_on` or a `LocalSet`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use tokio::sync::Notify;

use super::clock::Clock;
use super::global;

/// Clock backed by tokio's time source.
///
/// Matches the driver's sleeps, including when tokio time is paused in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Fires the global queue's timers from a tokio event loop.
#[derive(Debug)]
pub struct TimerDriver {
    notify: Rc<Notify>,
    stopped: Rc<Cell<bool>>,
}

impl TimerDriver {
    /// Creates a driver and hooks it to the global queue of this thread.
    ///
    /// A later `install` takes over; dropping an older driver leaves the
    /// newer one hooked.
    #[must_use]
    pub fn install() -> Self {
        let notify = Rc::new(Notify::new());
        global::set_waker(Rc::clone(&notify));
        Self {
            notify,
            stopped: Rc::new(Cell::new(false)),
        }
    }

    /// Runs until [`shutdown`](Self::shutdown) is called.
    pub async fn run(&self) {
        while !self.stopped.get() {
            match global::next_deadline() {
                Some(deadline) => {
                    let deadline = tokio::time::Instant::from_std(deadline);
                    tokio::select! {
                        () = tokio::time::sleep_until(deadline) => {
                            global::tick();
                        }
                        () = self.notify.notified() => {}
                    }
                }
                None => self.notify.notified().await,
            }
        }
    }

    /// Stops the run loop after its current iteration.
    pub fn shutdown(&self) {
        self.stopped.set(true);
        self.notify.notify_one();
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        global::clear_waker(&self.notify);
    }
}
