// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types with no dependencies outside `std`.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`notification`]: Notification value objects ([`NotificationId`](notification::NotificationId),
//!   [`AutoDismiss`](notification::AutoDismiss), [`Variant`](notification::Variant),
//!   [`ToastLimit`](notification::ToastLimit), [`RemoveDelay`](notification::RemoveDelay))

pub mod diagnostics;
pub mod notification;
