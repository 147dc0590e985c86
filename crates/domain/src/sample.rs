//! Sample: one debounced proximity transition.

use crate::time::Millis;

/// A debounced near/far state entered at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub is_near: bool,
    pub timestamp: Millis,
}

impl Sample {
    #[must_use]
    pub fn new(is_near: bool, timestamp: Millis) -> Self {
        Self { is_near, timestamp }
    }

    #[must_use]
    pub fn near(timestamp: Millis) -> Self {
        Self::new(true, timestamp)
    }

    #[must_use]
    pub fn far(timestamp: Millis) -> Self {
        Self::new(false, timestamp)
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_near { "near" } else { "far" };
        write!(f, "{state}@{}ms", self.timestamp)
    }
}
