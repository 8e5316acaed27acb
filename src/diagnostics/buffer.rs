// SPDX-License-Identifier: MPL-2.0
//! Circular buffer for diagnostic event storage.
//!
//! Oldest entries are evicted once capacity is reached.

use std::collections::VecDeque;

pub use crate::domain::diagnostics::BufferCapacity;

/// A generic ring buffer with fixed capacity, oldest element first.
///
/// ```
/// use toast_queue::diagnostics::CircularBuffer;
///
/// let mut buffer = CircularBuffer::with_raw_capacity(2);
/// buffer.push("shown");
/// buffer.push("dismissed");
/// buffer.push("removed");
///
/// let items: Vec<_> = buffer.iter().copied().collect();
/// assert_eq!(items, vec!["dismissed", "removed"]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a buffer with an unchecked capacity (at least 1).
    ///
    /// Prefer [`CircularBuffer::new`] outside of tests.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an element, evicting the oldest if at capacity.
    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_evicts_oldest_at_capacity() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);
        for i in 0..5 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push('a');
        buffer.push('b');
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!['b']);
    }

    #[test]
    fn new_uses_validated_capacity() {
        let buffer: CircularBuffer<u8> = CircularBuffer::new(BufferCapacity::default());
        assert_eq!(buffer.capacity(), 1000);
        assert!(buffer.is_empty());
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = CircularBuffer::with_raw_capacity(4);
        buffer.push(1);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
