// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the ordered list of notifications, arms and cancels
//! their dismiss/removal timers and broadcasts the full list to every
//! observer after each change.
//!
//! Per notification the lifecycle is `visible → dismissed → removed`.
//! Dismissal happens on timer expiry, [`Manager::dismiss`] or a bulk
//! dismiss; removal happens when the removal delay runs out, on
//! [`Manager::remove`], or when a newer notification evicts the oldest
//! one from a full store.

use std::time::Instant;

use super::clock::{Clock, SystemClock};
use super::notification::{Notification, ShowRequest, ToastPatch};
use super::observer::{Observer, ObserverList, SubscriptionId, ToastState};
use super::timers::{TimerKind, TimerTable};
use crate::diagnostics::{
    DiagnosticsHandle, DismissReason, LifecycleEvent, RemoveReason, WarningEvent, WarningType,
};
use crate::domain::notification::{AutoDismiss, NotificationId, RemoveDelay, ToastLimit};

/// Tunables for a [`Manager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagerSettings {
    /// Maximum number of retained notifications.
    pub limit: ToastLimit,
    /// Auto-dismiss delay used when a request does not set one.
    pub default_duration: AutoDismiss,
    /// Time between dismissal and removal.
    pub remove_delay: RemoveDelay,
}

/// Id of a freshly shown notification, with operations scoped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowHandle {
    id: NotificationId,
}

impl ShowHandle {
    #[must_use]
    pub fn id(self) -> NotificationId {
        self.id
    }

    /// Merges `patch` into this notification. No-op once it is removed.
    pub fn update<C: Clock>(self, manager: &mut Manager<C>, patch: ToastPatch) {
        manager.update(self.id, patch);
    }

    /// Dismisses this notification. No-op once it is removed.
    pub fn dismiss<C: Clock>(self, manager: &mut Manager<C>) {
        manager.dismiss(Some(self.id));
    }
}

/// Manages the notification list, its timers and its observers.
///
/// All operations are synchronous. Timers only fire from [`Manager::tick`],
/// which an event loop calls once [`Manager::next_deadline`] has passed.
/// Operations on ids that are no longer tracked are silent no-ops.
#[derive(Debug)]
pub struct Manager<C: Clock = SystemClock> {
    /// Tracked notifications, oldest first.
    notifications: Vec<Notification>,
    timers: TimerTable,
    observers: ObserverList,
    settings: ManagerSettings,
    clock: C,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Manager<SystemClock> {
    /// Creates an empty manager on the system clock with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(ManagerSettings::default(), SystemClock)
    }
}

impl Default for Manager<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Manager<C> {
    /// Creates an empty manager reading time from `clock`.
    pub fn with_clock(settings: ManagerSettings, clock: C) -> Self {
        Self {
            notifications: Vec::new(),
            timers: TimerTable::new(),
            observers: ObserverList::new(),
            settings,
            clock,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle for lifecycle events and warnings.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Shows a new notification.
    ///
    /// Fields missing from `request` fall back to the manager defaults. When
    /// the store is full the oldest notification is evicted first, with its
    /// timers cancelled.
    pub fn show(&mut self, request: ShowRequest) -> ShowHandle {
        self.show_with_id(NotificationId::next(), request)
    }

    /// Shows a notification under an id allocated by the caller.
    pub(crate) fn show_with_id(
        &mut self,
        id: NotificationId,
        request: ShowRequest,
    ) -> ShowHandle {
        let now = self.clock.now();

        while self.notifications.len() >= self.settings.limit.value() {
            let evicted = self.notifications.remove(0);
            self.timers.cancel_all_for(evicted.id());
            self.log(LifecycleEvent::removed(evicted.id(), RemoveReason::Evicted));
        }

        let mut notification =
            Notification::from_request(id, request, self.settings.default_duration, now);
        match deadline_after(now, notification.duration()) {
            Some(deadline) => self.timers.arm(id, TimerKind::Dismiss, deadline),
            None => notification.set_duration(AutoDismiss::Never),
        }
        self.log(LifecycleEvent::shown(
            id,
            notification.variant().as_str(),
            notification.duration().is_never(),
        ));

        self.notifications.push(notification);
        self.broadcast();
        ShowHandle { id }
    }

    /// Merges `patch` into the notification `id`.
    ///
    /// A visible notification gets its dismiss timer restarted from now with
    /// the (possibly new) duration. A dismissed one keeps its removal timer.
    pub fn update(&mut self, id: NotificationId, patch: ToastPatch) {
        let now = self.clock.now();
        let (changed, visible, duration) =
            match self.notifications.iter_mut().find(|n| n.id() == id) {
                Some(notification) => (
                    notification.apply(patch),
                    notification.is_visible(),
                    notification.duration(),
                ),
                None => {
                    self.warn(WarningType::StaleReference, format!("update({id})"));
                    return;
                }
            };

        let mut rearmed = false;
        if visible {
            self.timers.cancel(id, TimerKind::Dismiss);
            match deadline_after(now, duration) {
                Some(deadline) => {
                    self.timers.arm(id, TimerKind::Dismiss, deadline);
                    rearmed = true;
                }
                None => {
                    if let Some(notification) =
                        self.notifications.iter_mut().find(|n| n.id() == id)
                    {
                        notification.set_duration(AutoDismiss::Never);
                    }
                }
            }
        }
        self.log(LifecycleEvent::updated(id, rearmed));

        if changed {
            self.broadcast();
        }
    }

    /// Dismisses one notification, or every notification when `id` is `None`.
    ///
    /// Dismissed notifications stay in the store until their removal timer
    /// fires. Dismissing an already dismissed notification changes nothing.
    pub fn dismiss(&mut self, id: Option<NotificationId>) {
        let now = self.clock.now();
        let changed = match id {
            Some(id) => {
                if !self.contains(id) {
                    self.warn(WarningType::StaleReference, format!("dismiss({id})"));
                    return;
                }
                self.hide(id, now, DismissReason::Explicit)
            }
            None => {
                let ids: Vec<NotificationId> =
                    self.notifications.iter().map(Notification::id).collect();
                let mut changed = false;
                for id in ids {
                    changed |= self.hide(id, now, DismissReason::Bulk);
                }
                changed
            }
        };

        if changed {
            self.broadcast();
        }
    }

    /// Deletes one notification immediately, or all of them when `id` is `None`.
    ///
    /// Every timer belonging to a removed notification is cancelled.
    pub fn remove(&mut self, id: Option<NotificationId>) {
        match id {
            Some(id) => {
                if self.take(id, RemoveReason::Forced) {
                    self.broadcast();
                } else {
                    self.warn(WarningType::StaleReference, format!("remove({id})"));
                }
            }
            None => {
                self.timers.clear();
                if self.notifications.is_empty() {
                    return;
                }
                let removed: Vec<NotificationId> =
                    self.notifications.drain(..).map(|n| n.id()).collect();
                for id in removed {
                    self.log(LifecycleEvent::removed(id, RemoveReason::Forced));
                }
                self.broadcast();
            }
        }
    }

    /// Registers an observer called with the full list after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&ToastState<'_>) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Registers an observer under an id allocated by the caller.
    pub(crate) fn subscribe_with_id(&mut self, id: SubscriptionId, observer: Observer) {
        self.observers.insert(id, observer);
    }

    /// Unregisters an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Fires every timer whose deadline has passed, earliest first.
    ///
    /// Each firing is a separate change and broadcast. A removal timer armed
    /// by a firing dismiss timer counts from that timer's deadline, so a
    /// large jump in time replays the same transitions as small steps.
    ///
    /// Returns the number of timers that fired.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            fired += 1;
            self.fire(timer.id, timer.kind, timer.deadline);
        }
        fired
    }

    /// Fires one timer right now, as if its deadline had been reached.
    ///
    /// Does nothing and returns `false` when that timer is not armed, e.g.
    /// because the notification was removed in the meantime.
    pub fn fire_timer(&mut self, id: NotificationId, kind: TimerKind) -> bool {
        if !self.timers.cancel(id, kind) {
            self.warn(
                WarningType::IgnoredTimer,
                format!("{kind:?} timer for {id} is not armed"),
            );
            return false;
        }
        let now = self.clock.now();
        self.fire(id, kind, now)
    }

    /// Returns the earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Returns the deadline of one pending timer.
    #[must_use]
    pub fn timer_deadline(&self, id: NotificationId, kind: TimerKind) -> Option<Instant> {
        self.timers.deadline(id, kind)
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns all tracked notifications in display order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn state(&self) -> ToastState<'_> {
        ToastState {
            notifications: &self.notifications,
        }
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Returns the number of visible (not yet dismissed) notifications.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_visible()).count()
    }

    #[must_use]
    pub fn settings(&self) -> ManagerSettings {
        self.settings
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Applies a timer action. Returns whether the store changed.
    fn fire(&mut self, id: NotificationId, kind: TimerKind, at: Instant) -> bool {
        let changed = match kind {
            TimerKind::Dismiss => self.hide(id, at, DismissReason::Timer),
            TimerKind::Remove => self.take(id, RemoveReason::Timer),
        };
        if changed {
            self.broadcast();
        } else {
            self.warn(
                WarningType::IgnoredTimer,
                format!("{kind:?} timer fired for untracked {id}"),
            );
        }
        changed
    }

    /// Hides `id` and arms its removal timer from `at`.
    fn hide(&mut self, id: NotificationId, at: Instant, reason: DismissReason) -> bool {
        let hidden = match self.notifications.iter_mut().find(|n| n.id() == id) {
            Some(notification) => notification.hide(),
            None => return false,
        };
        if !hidden {
            return false;
        }

        // Past the clock's range the removal is due right away.
        let removal = at
            .checked_add(self.settings.remove_delay.value())
            .unwrap_or(at);
        self.timers.cancel(id, TimerKind::Dismiss);
        self.timers.arm(id, TimerKind::Remove, removal);
        self.log(LifecycleEvent::dismissed(id, reason));
        true
    }

    /// Deletes `id` and its timers.
    fn take(&mut self, id: NotificationId, reason: RemoveReason) -> bool {
        let Some(pos) = self.notifications.iter().position(|n| n.id() == id) else {
            return false;
        };
        self.notifications.remove(pos);
        self.timers.cancel_all_for(id);
        self.log(LifecycleEvent::removed(id, reason));
        true
    }

    fn broadcast(&mut self) {
        let state = ToastState {
            notifications: &self.notifications,
        };
        self.observers.broadcast(&state);
    }

    fn log(&self, event: LifecycleEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_lifecycle(event, self.clock.now());
        }
    }

    pub(crate) fn warn(&self, warning_type: WarningType, message: String) {
        if let Some(handle) = &self.diagnostics {
            let event = WarningEvent::new(warning_type, message);
            handle.log_warning(event, self.clock.now());
        }
    }
}

/// Instant `duration` after `now`. `None` for `Never` and for delays beyond
/// the clock's range.
fn deadline_after(now: Instant, duration: AutoDismiss) -> Option<Instant> {
    duration.delay().and_then(|delay| now.checked_add(delay))
}
