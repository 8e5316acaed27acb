// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The notification manager reports through a [`DiagnosticsHandle`]; the
//! collector drains the channel into a bounded buffer and turns it into
//! a JSON report on demand.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::export::{write_atomic, ExportError};
use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, DiagnosticReport,
    LifecycleEvent, ReportMetadata, SerializableEvent, WarningEvent,
};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sends never block: when the channel is full the event
/// is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records a notification state transition that happened at `at`.
    pub fn log_lifecycle(&self, event: LifecycleEvent, at: Instant) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Lifecycle { event }, at);
        let _ = self.event_tx.try_send(event);
    }

    pub fn log_warning(&self, event: WarningEvent, at: Instant) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning { event }, at);
        let _ = self.event_tx.try_send(event);
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Kept to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for duration calculations).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every pending event from the channel into the buffer.
    ///
    /// Call this periodically (e.g. after each timer tick); the channel is
    /// bounded and drops events once full.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Builds a report from the events currently in the buffer.
    ///
    /// Pending channel events are not included; call
    /// [`process_pending`](Self::process_pending) first.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }

    /// Serializes the current report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the current report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail.
    /// Returns `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}
