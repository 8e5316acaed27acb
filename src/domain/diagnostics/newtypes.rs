// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// Buffer Capacity Bounds
// =============================================================================

/// Event log capacity bounds (16 to 10000 events).
pub mod buffer_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 16;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 1000;
}

// =============================================================================
// BufferCapacity
// =============================================================================

/// Number of lifecycle events kept by the diagnostics log.
///
/// Values outside the valid range are clamped, so a capacity is always
/// usable as-is:
///
/// ```
/// use toast_queue::domain::diagnostics::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(50_000).value(), 10_000);
/// assert_eq!(BufferCapacity::new(0).value(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}
