//! Pattern: a timed near/far gesture shape and its evaluation.
//!
//! A [`Pattern`] is an ordered, non-empty list of [`Segment`]s. Evaluating
//! it against the tail of a [`History`] tells whether the most recent
//! transitions form the gesture, and if so how long the terminal state must
//! still hold before the gesture is confirmed.

mod builder;
pub mod presets;
mod segment;

pub use builder::PatternBuilder;
pub use segment::Segment;

use std::time::Duration;

use crate::history::History;
use crate::time::{Millis, elapsed};

/// Result of evaluating a [`Pattern`] against a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The history does not (yet) form this gesture.
    NoMatch,
    /// The gesture is confirmed once `after` milliseconds pass without
    /// another transition.
    Fire { after: Millis },
}

impl MatchOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Fire { .. })
    }

    /// Confirmation delay, `None` on [`NoMatch`](Self::NoMatch).
    #[must_use]
    pub fn delay(&self) -> Option<Duration> {
        match self {
            Self::Fire { after } => Some(Duration::from_millis(*after)),
            Self::NoMatch => None,
        }
    }
}

/// An immutable gesture definition. Build one with [`Pattern::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Create a builder for a pattern called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PatternBuilder {
        PatternBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments, which is also the number of trailing samples the
    /// pattern consumes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`: the builder rejects empty patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Match the last `len()` samples of `history` against this pattern.
    ///
    /// Every consecutive pair of samples must start in the state of its
    /// segment and be separated by a delta strictly inside the segment's
    /// bounds. When the most recent sample is already in the terminal
    /// segment's state the gesture fires after the terminal `min`.
    #[must_use]
    pub fn evaluate(&self, history: &History) -> MatchOutcome {
        let Some(window) = history.tail(self.segments.len()) else {
            return MatchOutcome::NoMatch;
        };

        for (pair, segment) in window.windows(2).zip(&self.segments) {
            let (previous, next) = (pair[0], pair[1]);
            if previous.is_near != segment.is_near
                || !segment.accepts(elapsed(previous.timestamp, next.timestamp))
            {
                return MatchOutcome::NoMatch;
            }
        }

        match (window.last(), self.segments.last()) {
            (Some(last), Some(terminal)) if last.is_near == terminal.is_near => {
                MatchOutcome::Fire {
                    after: terminal.min,
                }
            }
            _ => MatchOutcome::NoMatch,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.name)?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}
