// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` entity held by the manager,
//! the `ShowRequest` payload used to create one and the `ToastPatch`
//! used to update one in place.

use crate::domain::notification::{AutoDismiss, NotificationId, Variant};
use std::time::{Duration, Instant};

/// An optional action a renderer may draw next to the message.
///
/// The manager stores it verbatim; `key` lets the caller recognise which
/// action was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastAction {
    /// Button label shown to the user.
    pub label: String,
    /// Caller-defined key reported back when the action is triggered.
    pub key: String,
}

impl ToastAction {
    /// Creates a new action.
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// A notification tracked by the manager.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    title: Option<String>,
    description: Option<String>,
    variant: Variant,
    visible: bool,
    duration: AutoDismiss,
    action: Option<ToastAction>,
    created_at: Instant,
}

impl Notification {
    /// Builds a visible notification from a request, filling gaps from the defaults.
    pub(crate) fn from_request(
        id: NotificationId,
        request: ShowRequest,
        default_duration: AutoDismiss,
        created_at: Instant,
    ) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            variant: request.variant.unwrap_or_default(),
            visible: true,
            duration: request.duration.unwrap_or(default_duration),
            action: request.action,
            created_at,
        }
    }

    /// Merges every field set in `patch`. Returns whether anything changed.
    pub(crate) fn apply(&mut self, patch: ToastPatch) -> bool {
        let before = self.clone();
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(variant) = patch.variant {
            self.variant = variant;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
        *self != before
    }

    pub(crate) fn set_duration(&mut self, duration: AutoDismiss) {
        self.duration = duration;
    }

    /// Marks the notification hidden. Returns `false` if it already was.
    pub(crate) fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Returns `true` until the notification is dismissed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the requested auto-dismiss delay.
    #[must_use]
    pub fn duration(&self) -> AutoDismiss {
        self.duration
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    /// Returns when this notification was created, on the manager's clock.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

/// Payload of a "show notification" request.
///
/// Every field is optional; missing ones fall back to the manager defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: Option<Variant>,
    pub duration: Option<AutoDismiss>,
    pub action: Option<ToastAction>,
}

impl ShowRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request with the given title and variant.
    pub fn with_variant(variant: Variant, title: impl Into<String>) -> Self {
        Self::new().variant(variant).title(title)
    }

    /// Creates a success request.
    pub fn success(title: impl Into<String>) -> Self {
        Self::with_variant(Variant::Success, title)
    }

    /// Creates an info request.
    pub fn info(title: impl Into<String>) -> Self {
        Self::with_variant(Variant::Info, title)
    }

    /// Creates a warning request.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::with_variant(Variant::Warning, title)
    }

    /// Creates a destructive (error) request.
    pub fn error(title: impl Into<String>) -> Self {
        Self::with_variant(Variant::Destructive, title)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets a custom auto-dismiss delay, overriding the manager default.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(AutoDismiss::After(duration));
        self
    }

    /// Disables auto-dismiss; the notification stays until dismissed.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.duration = Some(AutoDismiss::Never);
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Partial update merged into an existing notification.
///
/// Only fields set to `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: Option<Variant>,
    pub duration: Option<AutoDismiss>,
    pub action: Option<ToastAction>,
}

impl ToastPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(AutoDismiss::After(duration));
        self
    }

    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.duration = Some(AutoDismiss::Never);
        self
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }
}
