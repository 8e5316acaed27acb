// SPDX-License-Identifier: MPL-2.0
//! Notification newtypes.
//!
//! This module provides type-safe wrappers for notification values,
//! ensuring they are always within valid ranges.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// =============================================================================
// NotificationId
// =============================================================================

/// Unique identifier for a notification.
///
/// Identifiers come from a process-wide counter and are never reused,
/// even across separate managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Allocates a fresh identifier.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// AutoDismiss
// =============================================================================

/// Auto-dismiss bounds.
pub mod auto_dismiss_bounds {
    /// Default delay before a notification hides itself (milliseconds).
    pub const DEFAULT_MS: u64 = 5000;
    /// Millisecond value interpreted as "never dismiss".
    pub const INFINITE_MS: u64 = u64::MAX;
}

/// How long a notification stays visible before it dismisses itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoDismiss {
    /// Dismiss after the given delay.
    After(Duration),
    /// Stay visible until dismissed explicitly.
    Never,
}

impl AutoDismiss {
    /// Builds an auto-dismiss delay from milliseconds.
    ///
    /// [`auto_dismiss_bounds::INFINITE_MS`] maps to [`AutoDismiss::Never`].
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        if ms == auto_dismiss_bounds::INFINITE_MS {
            Self::Never
        } else {
            Self::After(Duration::from_millis(ms))
        }
    }

    /// Returns the delay, or `None` for [`AutoDismiss::Never`].
    #[must_use]
    pub fn delay(self) -> Option<Duration> {
        match self {
            Self::After(delay) => Some(delay),
            Self::Never => None,
        }
    }

    /// Returns whether this is the infinite sentinel.
    #[must_use]
    pub fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }
}

impl Default for AutoDismiss {
    fn default() -> Self {
        Self::After(Duration::from_millis(auto_dismiss_bounds::DEFAULT_MS))
    }
}

// =============================================================================
// Variant
// =============================================================================

/// Display classification of a notification.
///
/// The set is open: tags the crate does not know are kept verbatim in
/// [`Variant::Custom`]. The queue never interprets the variant; mapping it
/// to a supported style is up to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Neutral styling.
    #[default]
    Default,
    /// Destructive / error styling.
    Destructive,
    /// Operation completed successfully.
    Success,
    /// Something needs attention but nothing failed.
    Warning,
    /// Informational message.
    Info,
    /// Any other caller-defined tag.
    Custom(String),
}

impl Variant {
    /// Returns the tag used for this variant.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Custom(tag) => tag,
        }
    }
}

impl FromStr for Variant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Self::Default,
            "destructive" | "error" => Self::Destructive,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "info" => Self::Info,
            _ => Self::Custom(s.to_string()),
        })
    }
}

impl From<&str> for Variant {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(variant) => variant,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ToastLimit
// =============================================================================

/// Retained notification count bounds (1 to 50).
pub mod toast_limit_bounds {
    /// Minimum number of retained notifications.
    pub const MIN: usize = 1;
    /// Maximum number of retained notifications.
    pub const MAX: usize = 50;
    /// Default number of retained notifications.
    pub const DEFAULT: usize = 5;
}

/// Maximum number of notifications held by a manager at once.
///
/// Dismissed notifications that are still waiting for removal count
/// towards the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLimit(usize);

impl ToastLimit {
    /// Creates a new limit, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(toast_limit_bounds::MIN, toast_limit_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for ToastLimit {
    fn default() -> Self {
        Self(toast_limit_bounds::DEFAULT)
    }
}

// =============================================================================
// RemoveDelay
// =============================================================================

/// Removal delay bounds in milliseconds (0 to 60 s).
pub mod remove_delay_bounds {
    /// Minimum removal delay.
    pub const MIN_MS: u64 = 0;
    /// Maximum removal delay.
    pub const MAX_MS: u64 = 60_000;
    /// Default removal delay.
    pub const DEFAULT_MS: u64 = 5000;
}

/// Time a dismissed notification is kept before it is deleted,
/// leaving room for an exit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveDelay(Duration);

impl RemoveDelay {
    /// Creates a new removal delay from milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms.clamp(
            remove_delay_bounds::MIN_MS,
            remove_delay_bounds::MAX_MS,
        )))
    }

    /// Returns the delay.
    #[must_use]
    pub fn value(self) -> Duration {
        self.0
    }
}

impl Default for RemoveDelay {
    fn default() -> Self {
        Self::from_millis(remove_delay_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================
