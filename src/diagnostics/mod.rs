// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notification queue.
//!
//! The manager reports every state transition and every ignored operation
//! (stale ids, timers for removed notifications) as a structured event.
//! Events travel over a bounded channel into a memory-bounded circular
//! buffer and can be exported as a JSON report.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: non-blocking sender given to the manager
//! - [`DiagnosticsCollector`]: drains the channel and builds reports
//! - [`CircularBuffer`]: generic ring buffer with configurable capacity
//! - [`DiagnosticEventKind`]: lifecycle transitions and warnings

mod buffer;
mod collector;
mod events;
mod export;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, DismissReason, LifecycleEvent, RemoveReason,
    WarningEvent, WarningType,
};
pub use export::{generate_default_filename, write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
