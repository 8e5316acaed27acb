// SPDX-License-Identifier: MPL-2.0
//! Per-notification timer bookkeeping.
//!
//! Each notification owns at most one timer of each [`TimerKind`]. Arming
//! a timer that already exists replaces it, so a stale deadline can never
//! fire twice.

use crate::domain::notification::NotificationId;
use std::collections::HashMap;
use std::time::Instant;

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Hide a visible notification.
    Dismiss,
    /// Delete a dismissed notification.
    Remove,
}

/// A timer that reached its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTimer {
    pub id: NotificationId,
    pub kind: TimerKind,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Instant,
    /// Arming order, breaks ties between equal deadlines.
    seq: u64,
}

/// Pending timers keyed by notification and kind.
#[derive(Debug, Default)]
pub struct TimerTable {
    entries: HashMap<(NotificationId, TimerKind), Entry>,
    next_seq: u64,
}

impl TimerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer, replacing any existing timer of the same kind for `id`.
    pub fn arm(&mut self, id: NotificationId, kind: TimerKind, deadline: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((id, kind), Entry { deadline, seq });
    }

    /// Cancels one timer. Returns whether it was pending.
    pub fn cancel(&mut self, id: NotificationId, kind: TimerKind) -> bool {
        self.entries.remove(&(id, kind)).is_some()
    }

    /// Cancels every timer belonging to `id`.
    pub fn cancel_all_for(&mut self, id: NotificationId) {
        self.entries.retain(|(timer_id, _), _| *timer_id != id);
    }

    /// Cancels everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_armed(&self, id: NotificationId, kind: TimerKind) -> bool {
        self.entries.contains_key(&(id, kind))
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: NotificationId, kind: TimerKind) -> Option<Instant> {
        self.entries.get(&(id, kind)).map(|entry| entry.deadline)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Removes and returns the earliest timer due at `now`, if any.
    pub fn pop_due(&mut self, now: Instant) -> Option<DueTimer> {
        let (&(id, kind), _) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))?;
        let entry = self.entries.remove(&(id, kind))?;
        Some(DueTimer {
            id,
            kind,
            deadline: entry.deadline,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn arming_twice_keeps_a_single_timer() {
        let mut timers = TimerTable::new();
        let id = NotificationId::next();
        let now = Instant::now();

        timers.arm(id, TimerKind::Dismiss, now + Duration::from_secs(5));
        timers.arm(id, TimerKind::Dismiss, now + Duration::from_secs(1));

        assert_eq!(timers.len(), 1);
        assert_eq!(
            timers.deadline(id, TimerKind::Dismiss),
            Some(now + Duration::from_secs(1))
        );
    }

    #[test]
    fn pop_due_returns_timers_in_deadline_order() {
        let mut timers = TimerTable::new();
        let first = NotificationId::next();
        let second = NotificationId::next();
        let now = Instant::now();

        timers.arm(second, TimerKind::Dismiss, now + Duration::from_millis(200));
        timers.arm(first, TimerKind::Dismiss, now + Duration::from_millis(100));
        timers.arm(first, TimerKind::Remove, now + Duration::from_secs(10));

        let later = now + Duration::from_secs(1);
        assert_eq!(timers.pop_due(later).map(|t| t.id), Some(first));
        assert_eq!(timers.pop_due(later).map(|t| t.id), Some(second));
        assert!(timers.pop_due(later).is_none());
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn equal_deadlines_fire_in_arming_order() {
        let mut timers = TimerTable::new();
        let a = NotificationId::next();
        let b = NotificationId::next();
        let deadline = Instant::now();

        timers.arm(b, TimerKind::Dismiss, deadline);
        timers.arm(a, TimerKind::Dismiss, deadline);

        assert_eq!(timers.pop_due(deadline).map(|t| t.id), Some(b));
        assert_eq!(timers.pop_due(deadline).map(|t| t.id), Some(a));
    }

    #[test]
    fn cancel_all_for_leaves_other_notifications() {
        let mut timers = TimerTable::new();
        let a = NotificationId::next();
        let b = NotificationId::next();
        let now = Instant::now();

        timers.arm(a, TimerKind::Dismiss, now);
        timers.arm(a, TimerKind::Remove, now);
        timers.arm(b, TimerKind::Dismiss, now);

        timers.cancel_all_for(a);
        assert!(!timers.is_armed(a, TimerKind::Dismiss));
        assert!(!timers.is_armed(a, TimerKind::Remove));
        assert!(timers.is_armed(b, TimerKind::Dismiss));
        assert_eq!(timers.next_deadline(), Some(now));
    }
}
