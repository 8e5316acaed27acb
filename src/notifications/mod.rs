// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue.
//!
//! Short-lived messages are shown to the user, hidden after a delay and
//! removed from the store once their exit animation had time to play.
//!
//! # Components
//!
//! - [`manager`] - `Manager` owning the list, its timers and its observers
//! - [`notification`] - `Notification` record plus show/update payloads
//! - [`timers`] - per-notification dismiss and removal deadlines
//! - [`clock`] - injectable time sources
//! - [`global`] - thread-local queue used through free functions
//! - [`driver`] - tokio task firing the global queue's timers
//!
//! # Usage
//!
//! ```
//! use toast_queue::notifications::{Manager, ShowRequest};
//!
//! let mut manager = Manager::new();
//! let _subscription = manager.subscribe(|state| {
//!     println!("{} toast(s)", state.notifications.len());
//! });
//!
//! let handle = manager.show(ShowRequest::success("Image saved"));
//! handle.dismiss(&mut manager);
//! assert_eq!(manager.visible_count(), 0);
//! ```
//!
//! # Defaults
//!
//! - At most 5 notifications are retained; the oldest is evicted first
//! - Notifications auto-dismiss after 5 s unless marked persistent
//! - Dismissed notifications are removed 5 s later

pub mod clock;
pub mod driver;
pub mod global;
pub mod manager;
pub mod notification;
pub mod observer;
pub mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{TimerDriver, TokioClock};
pub use manager::{Manager, ManagerSettings, ShowHandle};
pub use notification::{Notification, ShowRequest, ToastAction, ToastPatch};
pub use observer::{Observer, SubscriptionId, ToastState};
pub use timers::{DueTimer, TimerKind, TimerTable};

pub use crate::domain::notification::{AutoDismiss, NotificationId, Variant};
