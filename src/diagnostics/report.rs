// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report generation.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DiagnosticEventKind;

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Unique identifier for this report (UUID v4)
    pub report_id: String,
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    /// Version of the crate that generated the report
    pub version: String,
    /// When diagnostic collection started (RFC 3339)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

/// An event with its timestamp relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self { timestamp_ms, kind }
    }
}

/// Event counts keyed by [`DiagnosticEventKind::label`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub event_counts: BTreeMap<String, usize>,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut event_counts = BTreeMap::new();
        for event in events {
            *event_counts
                .entry(event.kind.label().to_string())
                .or_insert(0) += 1;
        }
        Self { event_counts }
    }
}

/// A complete diagnostic report ready for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            events,
            summary,
        }
    }
}
