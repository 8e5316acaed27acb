// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification lifecycle tracking.
//!
//! Events only carry identifiers and classification tags. Titles and
//! descriptions are caller text and never enter the log.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::notification::NotificationId;

/// Why a notification was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Its auto-dismiss timer expired.
    Timer,
    /// A caller dismissed it by id.
    Explicit,
    /// A caller dismissed every notification at once.
    Bulk,
}

/// Why a notification left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveReason {
    /// The removal delay after dismissal elapsed.
    Timer,
    /// A caller removed it without waiting.
    Forced,
    /// A newer notification pushed it out of a full store.
    Evicted,
}

/// State transitions of a single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum LifecycleEvent {
    Shown {
        id: u64,
        variant: String,
        persistent: bool,
    },
    Updated {
        id: u64,
        /// Whether the dismiss timer was re-armed.
        rearmed: bool,
    },
    Dismissed {
        id: u64,
        reason: DismissReason,
    },
    Removed {
        id: u64,
        reason: RemoveReason,
    },
}

impl LifecycleEvent {
    /// Returns the notification this event is about.
    #[must_use]
    pub fn notification_id(&self) -> u64 {
        match self {
            Self::Shown { id, .. }
            | Self::Updated { id, .. }
            | Self::Dismissed { id, .. }
            | Self::Removed { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn shown(id: NotificationId, variant: &str, persistent: bool) -> Self {
        Self::Shown {
            id: id.value(),
            variant: variant.to_string(),
            persistent,
        }
    }

    #[must_use]
    pub fn updated(id: NotificationId, rearmed: bool) -> Self {
        Self::Updated {
            id: id.value(),
            rearmed,
        }
    }

    #[must_use]
    pub fn dismissed(id: NotificationId, reason: DismissReason) -> Self {
        Self::Dismissed {
            id: id.value(),
            reason,
        }
    }

    #[must_use]
    pub fn removed(id: NotificationId, reason: RemoveReason) -> Self {
        Self::Removed {
            id: id.value(),
            reason,
        }
    }
}

/// Categories of warnings the queue can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// An operation targeted an id that is no longer tracked.
    StaleReference,
    /// A timer fired for a notification that is gone.
    IgnoredTimer,
    /// An observer tried to mutate the queue while being notified.
    ReentrantCall,
}

/// A warning with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with `timestamp`, taken from the queue's clock.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    Lifecycle { event: LifecycleEvent },
    Warning { event: WarningEvent },
}

impl DiagnosticEventKind {
    /// Short label used to group events in report summaries.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lifecycle { event } => match event {
                LifecycleEvent::Shown { .. } => "shown",
                LifecycleEvent::Updated { .. } => "updated",
                LifecycleEvent::Dismissed { .. } => "dismissed",
                LifecycleEvent::Removed { .. } => "removed",
            },
            Self::Warning { .. } => "warning",
        }
    }
}
