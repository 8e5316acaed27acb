// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` is a small notification queue for user-facing toasts.
//!
//! It keeps an ordered, bounded list of short-lived messages, hides them
//! after a delay, removes them once their exit transition had time to play
//! and broadcasts every change to subscribed renderers. Timers run against
//! an injectable clock, and a tokio driver fires them for the thread-local
//! global queue.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod render;
