// SPDX-License-Identifier: MPL-2.0
//! Process-wide notification queue for the UI thread.
//!
//! UI code calls the free functions in this module instead of threading a
//! [`Manager`] through every call site. The queue lives in a thread-local,
//! so it belongs to whichever thread runs the UI event loop; tests get a
//! clean queue per test thread and can call [`reset`] for isolation.
//!
//! Observers may call back into this module. Such calls cannot run while
//! a broadcast is in progress, so they are queued and applied, in order,
//! right after the current operation finishes.
//!
//! ```
//! use toast_queue::notifications::{global, ShowRequest};
//!
//! global::reset();
//! let toast = global::show(ShowRequest::success("Saved"));
//! assert_eq!(global::snapshot().len(), 1);
//!
//! toast.dismiss();
//! assert!(!global::snapshot()[0].is_visible());
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use tokio::sync::Notify;

use super::clock::{Clock, SystemClock};
use super::manager::{Manager, ManagerSettings};
use super::notification::{Notification, ShowRequest, ToastPatch};
use super::observer::{SubscriptionId, ToastState};
use crate::diagnostics::{DiagnosticsHandle, WarningType};
use crate::domain::notification::NotificationId;

/// Manager type backing the global queue.
pub type GlobalManager = Manager<Box<dyn Clock>>;

type Deferred = Box<dyn FnOnce(&mut GlobalManager)>;

thread_local! {
    static MANAGER: RefCell<GlobalManager> = RefCell::new(fresh(ManagerSettings::default(), Box::new(SystemClock)));
    static DEFERRED: RefCell<VecDeque<Deferred>> = const { RefCell::new(VecDeque::new()) };
    static WAKER: RefCell<Option<Rc<Notify>>> = const { RefCell::new(None) };
}

fn fresh(settings: ManagerSettings, clock: Box<dyn Clock>) -> GlobalManager {
    Manager::with_clock(settings, clock)
}

/// Replaces the queue with an empty one using `settings` and the system clock.
///
/// Observers, timers and the diagnostics handle of the previous queue are
/// dropped.
pub fn init(settings: ManagerSettings) {
    init_with_clock(settings, SystemClock);
}

/// Replaces the queue with an empty one reading time from `clock`.
///
/// Called from an observer, the replacement is queued like any other
/// mutation, so calls queued after it land on the new queue.
pub fn init_with_clock(settings: ManagerSettings, clock: impl Clock + 'static) {
    run(move |manager| *manager = fresh(settings, Box::new(clock)));
}

/// Resets the queue to an empty one with default settings.
pub fn reset() {
    init(ManagerSettings::default());
}

/// Attaches a diagnostics handle to the current queue.
pub fn set_diagnostics(handle: DiagnosticsHandle) {
    run(move |manager| manager.set_diagnostics(handle));
}

/// Handle to a notification shown through the global queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toast {
    id: NotificationId,
}

impl Toast {
    #[must_use]
    pub fn id(self) -> NotificationId {
        self.id
    }

    /// Merges `patch` into this notification.
    pub fn update(self, patch: ToastPatch) {
        update(self.id, patch);
    }

    /// Dismisses this notification.
    pub fn dismiss(self) {
        dismiss(Some(self.id));
    }
}

/// Shows a notification. See [`Manager::show`].
pub fn show(request: ShowRequest) -> Toast {
    let id = NotificationId::next();
    run(move |manager| {
        manager.show_with_id(id, request);
    });
    Toast { id }
}

/// See [`Manager::update`].
pub fn update(id: NotificationId, patch: ToastPatch) {
    run(move |manager| manager.update(id, patch));
}

/// See [`Manager::dismiss`].
pub fn dismiss(id: Option<NotificationId>) {
    run(move |manager| manager.dismiss(id));
}

/// See [`Manager::remove`].
pub fn remove(id: Option<NotificationId>) {
    run(move |manager| manager.remove(id));
}

/// Guard returned by [`subscribe`].
#[derive(Debug)]
#[must_use = "dropping the guard keeps the observer registered; call `unsubscribe` to remove it"]
pub struct Unsubscribe {
    id: SubscriptionId,
}

impl Unsubscribe {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stops future broadcasts to the observer.
    pub fn unsubscribe(self) {
        let id = self.id;
        run(move |manager| {
            manager.unsubscribe(id);
        });
    }
}

/// Registers an observer on the global queue.
pub fn subscribe(observer: impl FnMut(&ToastState<'_>) + 'static) -> Unsubscribe {
    let id = SubscriptionId::next();
    let observer = Box::new(observer);
    run(move |manager| manager.subscribe_with_id(id, observer));
    Unsubscribe { id }
}

/// Fires due timers. Returns how many fired, or `None` when called from
/// inside an observer.
pub fn tick() -> Option<usize> {
    let fired = MANAGER.with(|cell| {
        let mut manager = cell.try_borrow_mut().ok()?;
        let fired = manager.tick();
        drain_deferred(&mut manager);
        Some(fired)
    });
    if fired.is_some() {
        wake_driver();
    }
    fired
}

/// Earliest pending timer deadline. `None` also when called from an observer.
#[must_use]
pub fn next_deadline() -> Option<Instant> {
    with_manager(|manager| manager.next_deadline()).flatten()
}

/// Clones the current notification list.
///
/// Returns an empty list when called from inside an observer; observers
/// receive the list as their argument instead.
#[must_use]
pub fn snapshot() -> Vec<Notification> {
    with_manager(|manager| manager.notifications().to_vec()).unwrap_or_default()
}

/// Runs `f` with shared access to the queue.
///
/// Returns `None` while a mutation is in progress (i.e. from an observer).
pub fn with_manager<R>(f: impl FnOnce(&GlobalManager) -> R) -> Option<R> {
    MANAGER.with(|cell| cell.try_borrow().ok().map(|manager| f(&manager)))
}

/// Registers the notifier used to wake the timer driver after mutations.
pub(crate) fn set_waker(waker: Rc<Notify>) {
    WAKER.with(|slot| *slot.borrow_mut() = Some(waker));
}

/// Unregisters `waker` if it is still the registered one.
pub(crate) fn clear_waker(waker: &Rc<Notify>) {
    WAKER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.as_ref().is_some_and(|current| Rc::ptr_eq(current, waker)) {
            *slot = None;
        }
    });
}

#[cfg(test)]
pub(crate) fn has_waker() -> bool {
    WAKER.with(|slot| slot.borrow().is_some())
}

/// Applies `op` now, or after the in-flight operation when called reentrantly.
fn run(op: impl FnOnce(&mut GlobalManager) + 'static) {
    let applied = MANAGER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut manager) => {
            op(&mut manager);
            drain_deferred(&mut manager);
            true
        }
        Err(_) => {
            let deferred = move |manager: &mut GlobalManager| {
                manager.warn(
                    WarningType::ReentrantCall,
                    "call from an observer deferred".to_string(),
                );
                op(manager);
            };
            DEFERRED.with(|queue| queue.borrow_mut().push_back(Box::new(deferred)));
            false
        }
    });
    if applied {
        wake_driver();
    }
}

fn drain_deferred(manager: &mut GlobalManager) {
    while let Some(op) = DEFERRED.with(|queue| queue.borrow_mut().pop_front()) {
        op(manager);
    }
}

fn wake_driver() {
    WAKER.with(|slot| {
        if let Some(notify) = slot.borrow().as_ref() {
            notify.notify_one();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::notifications::clock::ManualClock;
    use std::cell::Cell;
    use std::time::Duration;

    #[test]
    fn show_and_dismiss_through_handle() {
        reset();
        let toast = show(ShowRequest::info("Syncing"));
        assert_eq!(snapshot().len(), 1);
        assert!(snapshot()[0].is_visible());

        toast.dismiss();
        assert!(!snapshot()[0].is_visible());

        remove(None);
        assert!(snapshot().is_empty());
    }

    #[test]
    fn handle_update_merges_fields() {
        reset();
        let toast = show(ShowRequest::new().title("Upload"));
        toast.update(ToastPatch::new().description("done"));

        let notification = with_manager(|m| m.get(toast.id()).cloned())
            .flatten()
            .expect("tracked");
        assert_eq!(notification.description(), Some("done"));
    }

    #[test]
    fn timers_fire_on_tick_with_injected_clock() {
        let clock = ManualClock::new();
        init_with_clock(ManagerSettings::default(), clock.clone());
        show(ShowRequest::new().duration(Duration::from_millis(100)));

        clock.advance(Duration::from_millis(100));
        assert_eq!(tick(), Some(1));
        assert!(!snapshot()[0].is_visible());

        clock.advance(Duration::from_millis(5000));
        assert_eq!(tick(), Some(1));
        assert!(snapshot().is_empty());
        assert!(next_deadline().is_none());
    }

    #[test]
    fn reentrant_calls_from_observer_are_deferred() {
        reset();
        let shown_follow_up = Rc::new(Cell::new(false));
        let flag = Rc::clone(&shown_follow_up);
        let _guard = subscribe(move |state| {
            assert!(snapshot().is_empty());
            if !flag.get() && state.notifications.len() == 1 {
                flag.set(true);
                show(ShowRequest::new().title("follow-up"));
            }
        });

        show(ShowRequest::new().title("first"));

        let titles: Vec<_> = snapshot()
            .iter()
            .map(|n| n.title().unwrap_or_default().to_string())
            .collect();
        assert_eq!(titles, vec!["first", "follow-up"]);
    }

    #[test]
    fn deferred_calls_are_reported_to_diagnostics() {
        reset();
        let mut collector = DiagnosticsCollector::default();
        set_diagnostics(collector.handle());
        let _guard = subscribe(|state| {
            if state.notifications.len() == 1 {
                dismiss(None);
            }
        });

        show(ShowRequest::new());
        collector.process_pending();

        assert!(!snapshot()[0].is_visible());
        assert!(collector.iter().any(|e| matches!(
            &e.kind,
            DiagnosticEventKind::Warning { event } if event.warning_type == WarningType::ReentrantCall
        )));
    }

    #[test]
    fn unsubscribe_stops_global_broadcasts() {
        reset();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let guard = subscribe(move |_| counter.set(counter.get() + 1));

        show(ShowRequest::new());
        guard.unsubscribe();
        show(ShowRequest::new());

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn reset_drops_previous_state() {
        reset();
        show(ShowRequest::new());
        reset();
        assert!(snapshot().is_empty());
        assert_eq!(with_manager(GlobalManager::pending_timers), Some(0));
    }

    #[test]
    fn reset_from_observer_keeps_later_queued_calls() {
        reset();
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        let _guard = subscribe(move |_| {
            if !flag.get() {
                flag.set(true);
                reset();
                show(ShowRequest::new().title("queued"));
            }
        });

        show(ShowRequest::new().title("first"));

        let titles: Vec<_> = snapshot()
            .iter()
            .map(|n| n.title().unwrap_or_default().to_string())
            .collect();
        assert_eq!(titles, vec!["queued"]);
    }

    #[test]
    fn reset_from_observer_drops_earlier_state() {
        reset();
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        let _guard = subscribe(move |_| {
            if !flag.get() {
                flag.set(true);
                show(ShowRequest::new().title("second"));
                reset();
            }
        });

        show(ShowRequest::new().title("first"));

        assert!(snapshot().is_empty());
        assert_eq!(with_manager(GlobalManager::pending_timers), Some(0));
    }
}
