// SPDX-License-Identifier: MPL-2.0
//! Notification domain types.

pub mod newtypes;

pub use newtypes::{
    auto_dismiss_bounds, remove_delay_bounds, toast_limit_bounds, AutoDismiss, NotificationId,
    RemoveDelay, ToastLimit, Variant,
};
