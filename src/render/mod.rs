// SPDX-License-Identifier: MPL-2.0
//! Rendering-side view of notifications.
//!
//! The manager stores variants as an open set of tags. A renderer only
//! supports a few styles, so tags are mapped through a [`StyleTable`] here,
//! at the rendering boundary, and anything unknown falls back to
//! [`ToastStyle::Neutral`].

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::domain::notification::Variant;
use crate::notifications::{Notification, ToastState};

/// Visual styles a toast can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastStyle {
    #[default]
    Neutral,
    Destructive,
}

impl ToastStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Destructive => "destructive",
        }
    }
}

/// Mapping from variant tag to style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: HashMap<String, ToastStyle>,
}

impl StyleTable {
    /// Creates a table without any mapping; every variant renders neutral.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Maps `variant` to `style`, replacing any previous mapping.
    #[must_use]
    pub fn with(mut self, variant: &Variant, style: ToastStyle) -> Self {
        self.styles.insert(variant.as_str().to_string(), style);
        self
    }

    /// Resolves the style for `variant`.
    #[must_use]
    pub fn style_for(&self, variant: &Variant) -> ToastStyle {
        self.styles
            .get(variant.as_str())
            .copied()
            .unwrap_or(ToastStyle::Neutral)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleTable {
    /// `default` renders neutral and `destructive` renders destructive.
    fn default() -> Self {
        Self::empty()
            .with(&Variant::Default, ToastStyle::Neutral)
            .with(&Variant::Destructive, ToastStyle::Destructive)
    }
}

/// Renders one notification as a single line of text.
#[must_use]
pub fn format_toast(notification: &Notification, table: &StyleTable) -> String {
    let mut line = format!(
        "[{}] #{}",
        table.style_for(notification.variant()).as_str(),
        notification.id()
    );
    if let Some(title) = notification.title() {
        let _ = write!(line, " {title}");
    }
    if let Some(description) = notification.description() {
        let _ = write!(line, " - {description}");
    }
    if let Some(action) = notification.action() {
        let _ = write!(line, " <{}>", action.label);
    }
    if !notification.is_visible() {
        line.push_str(" (dismissed)");
    }
    line
}

/// Renders the whole list, one notification per line.
#[must_use]
pub fn format_state(state: &ToastState<'_>, table: &StyleTable) -> String {
    if state.notifications.is_empty() {
        return "(no notifications)".to_string();
    }
    state
        .notifications
        .iter()
        .map(|notification| format_toast(notification, table))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Manager, ShowRequest, ToastAction};

    #[test]
    fn default_table_maps_supported_variants() {
        let table = StyleTable::default();
        assert_eq!(table.style_for(&Variant::Default), ToastStyle::Neutral);
        assert_eq!(table.style_for(&Variant::Destructive), ToastStyle::Destructive);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unsupported_variants_normalize_to_neutral() {
        let table = StyleTable::default();
        for variant in [
            Variant::Success,
            Variant::Warning,
            Variant::Info,
            Variant::Custom("sparkly".into()),
        ] {
            assert_eq!(table.style_for(&variant), ToastStyle::Neutral);
        }
    }

    #[test]
    fn custom_table_overrides_mapping() {
        let table = StyleTable::empty().with(&Variant::Warning, ToastStyle::Destructive);
        assert_eq!(table.style_for(&Variant::Warning), ToastStyle::Destructive);
        assert_eq!(table.style_for(&Variant::Destructive), ToastStyle::Neutral);
    }

    #[test]
    fn format_toast_includes_fields_and_visibility() {
        let mut manager = Manager::new();
        let id = manager
            .show(
                ShowRequest::error("Upload failed")
                    .description("disk full")
                    .action(ToastAction::new("Retry", "retry")),
            )
            .id();
        let table = StyleTable::default();

        let notification = &manager.notifications()[0];
        assert_eq!(
            format_toast(notification, &table),
            format!("[destructive] #{id} Upload failed - disk full <Retry>")
        );

        manager.dismiss(Some(id));
        assert!(format_toast(&manager.notifications()[0], &table).ends_with("(dismissed)"));
    }

    #[test]
    fn format_state_lists_notifications_in_order() {
        let mut manager = Manager::new();
        let table = StyleTable::default();
        assert_eq!(format_state(&manager.state(), &table), "(no notifications)");

        manager.show(ShowRequest::success("one"));
        manager.show(ShowRequest::new().title("two"));

        let rendered = format_state(&manager.state(), &table);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[neutral]") && lines[0].ends_with("one"));
        assert!(lines[1].ends_with("two"));
    }
}
