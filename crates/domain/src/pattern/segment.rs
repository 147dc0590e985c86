//! Segment: one timed step of a gesture pattern.

use crate::time::Millis;

/// A required near/far state and the admissible time spent in it.
///
/// `min` and `max` bound the time between entering this segment's state and
/// entering the next one. Both bounds are exclusive; `max = None` is
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub is_near: bool,
    pub min: Millis,
    pub max: Option<Millis>,
}

impl Segment {
    #[must_use]
    pub fn new(is_near: bool, min: Millis, max: Option<Millis>) -> Self {
        Self { is_near, min, max }
    }

    /// Whether `delta` lies strictly between `min` and `max`.
    #[must_use]
    pub fn accepts(&self, delta: Millis) -> bool {
        delta > self.min && self.max.is_none_or(|max| delta < max)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_near { "near" } else { "far" };
        match self.max {
            Some(max) => write!(f, "{state}({}..{max}ms)", self.min),
            None => write!(f, "{state}({}ms..)", self.min),
        }
    }
}
