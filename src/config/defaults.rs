// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! The bounds themselves live with the domain newtypes; this module
//! re-states them under configuration names so the settings file and the
//! types that validate it cannot drift apart.
//!
//! # Categories
//!
//! - **Queue**: retained notification count
//! - **Timing**: auto-dismiss and removal delays
//! - **Diagnostics**: event buffer size

use crate::domain::diagnostics::buffer_capacity_bounds;
use crate::domain::notification::{auto_dismiss_bounds, remove_delay_bounds, toast_limit_bounds};

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of retained notifications.
pub const DEFAULT_MAX_TOASTS: usize = toast_limit_bounds::DEFAULT;

/// Minimum number of retained notifications.
pub const MIN_MAX_TOASTS: usize = toast_limit_bounds::MIN;

/// Maximum number of retained notifications.
pub const MAX_MAX_TOASTS: usize = toast_limit_bounds::MAX;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default auto-dismiss delay (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = auto_dismiss_bounds::DEFAULT_MS;

/// Duration value meaning "never auto-dismiss" (in milliseconds).
pub const INFINITE_DURATION_MS: u64 = auto_dismiss_bounds::INFINITE_MS;

/// Default delay between dismissal and removal (in milliseconds).
pub const DEFAULT_REMOVE_DELAY_MS: u64 = remove_delay_bounds::DEFAULT_MS;

/// Maximum delay between dismissal and removal (in milliseconds).
pub const MAX_REMOVE_DELAY_MS: u64 = remove_delay_bounds::MAX_MS;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default diagnostics buffer capacity (events).
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;
