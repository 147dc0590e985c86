//! History: bounded FIFO of the most recent samples.
//!
//! Capacity is fixed at construction (the longest registered pattern).
//! Appending to a full history evicts the oldest sample first, so
//! `len() <= capacity()` always holds. Capacities are tiny (a handful of
//! samples), so eviction is a plain front removal.

use crate::sample::Sample;

/// Ordered buffer of recent [`Sample`]s, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    samples: Vec<Sample>,
    capacity: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` samples.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append `sample`, evicting the oldest entry when full.
    pub fn append(&mut self, sample: Sample) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Empty the history and seed it with a single baseline sample.
    pub fn reset(&mut self, baseline: Sample) {
        self.clear();
        self.append(baseline);
    }

    /// The last `n` samples in insertion order.
    ///
    /// Returns `None` when fewer than `n` samples are held; callers treat
    /// that as "cannot match yet".
    #[must_use]
    pub fn tail(&self, n: usize) -> Option<&[Sample]> {
        let len = self.samples.len();
        if len < n {
            return None;
        }
        Some(&self.samples[len - n..])
    }

    /// Most recent sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// All held samples, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}
