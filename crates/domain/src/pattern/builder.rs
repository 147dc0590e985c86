//! Step-by-step builder for [`Pattern`]s.
//!
//! Patterns strictly alternate near and far: only the first segment names
//! its state, every following one flips the previous state.

use crate::error::PatternError;
use crate::time::Millis;

use super::{Pattern, Segment};

/// Builder returned by [`Pattern::builder`].
#[derive(Debug)]
pub struct PatternBuilder {
    name: String,
    segments: Vec<Segment>,
    error: Option<PatternError>,
}

impl PatternBuilder {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
            error: None,
        }
    }

    /// First segment: hold `is_near` for more than `min` milliseconds.
    #[must_use]
    pub fn begin(mut self, is_near: bool, min: Millis) -> Self {
        if !self.segments.is_empty() {
            self.fail(PatternError::DuplicateBegin(self.name.clone()));
            return self;
        }
        self.segments.push(Segment::new(is_near, min, None));
        self
    }

    /// Next segment, opposite state, lasting strictly between `min` and `max`.
    #[must_use]
    pub fn then(self, min: Millis, max: Millis) -> Self {
        self.push_flipped(min, Some(max))
    }

    /// Next segment, opposite state, lasting more than `min`.
    #[must_use]
    pub fn then_unbounded(self, min: Millis) -> Self {
        self.push_flipped(min, None)
    }

    /// Terminal segment, opposite state. The gesture fires once this state
    /// has been held for `min` milliseconds.
    #[must_use]
    pub fn end(self, min: Millis) -> Self {
        self.push_flipped(min, None)
    }

    /// Consume the builder, validate, and return a [`Pattern`].
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when:
    /// - the name is empty ([`PatternError::EmptyName`])
    /// - a step was added before `begin` ([`PatternError::MissingBegin`])
    /// - `begin` was called twice ([`PatternError::DuplicateBegin`])
    /// - no segment was added ([`PatternError::EmptyPattern`])
    /// - a bounded segment has `max <= min` ([`PatternError::InvalidBounds`])
    pub fn build(self) -> Result<Pattern, PatternError> {
        if self.name.is_empty() {
            return Err(PatternError::EmptyName);
        }
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.segments.is_empty() {
            return Err(PatternError::EmptyPattern(self.name));
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if let Some(max) = segment.max
                && max <= segment.min
            {
                return Err(PatternError::InvalidBounds {
                    name: self.name,
                    index,
                    min: segment.min,
                    max,
                });
            }
        }
        Ok(Pattern {
            name: self.name,
            segments: self.segments,
        })
    }

    fn push_flipped(mut self, min: Millis, max: Option<Millis>) -> Self {
        match self.segments.last() {
            Some(previous) => {
                let segment = Segment::new(!previous.is_near, min, max);
                self.segments.push(segment);
            }
            None => self.fail(PatternError::MissingBegin(self.name.clone())),
        }
        self
    }

    fn fail(&mut self, err: PatternError) {
        self.error.get_or_insert(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_alternate_states_after_begin() {
        let pattern = Pattern::builder("wave")
            .begin(true, 200)
            .then(0, 1000)
            .then(0, 1000)
            .end(0)
            .build()
            .unwrap();

        let states: Vec<_> = pattern.segments().iter().map(|s| s.is_near).collect();
        assert_eq!(states, vec![true, false, true, false]);
    }

    #[test]
    fn should_leave_begin_and_end_unbounded() {
        let pattern = Pattern::builder("pocket")
            .begin(true, 3000)
            .end(0)
            .build()
            .unwrap();

        assert_eq!(pattern.segments()[0], Segment::new(true, 3000, None));
        assert_eq!(pattern.segments()[1], Segment::new(false, 0, None));
    }

    #[test]
    fn should_start_with_far_when_requested() {
        let pattern = Pattern::builder("uncover")
            .begin(false, 500)
            .then_unbounded(100)
            .end(0)
            .build()
            .unwrap();

        assert_eq!(pattern.segments()[1], Segment::new(true, 100, None));
        assert!(!pattern.segments()[2].is_near);
    }

    #[test]
    fn should_return_error_when_no_segment_added() {
        let result = Pattern::builder("empty").build();
        assert_eq!(result, Err(PatternError::EmptyPattern("empty".to_string())));
    }

    #[test]
    fn should_return_error_when_name_is_empty() {
        let result = Pattern::builder("").begin(true, 0).build();
        assert_eq!(result, Err(PatternError::EmptyName));
    }

    #[test]
    fn should_return_error_when_step_precedes_begin() {
        let result = Pattern::builder("headless").then(0, 10).end(0).build();
        assert_eq!(
            result,
            Err(PatternError::MissingBegin("headless".to_string()))
        );
    }

    #[test]
    fn should_return_error_when_begin_called_twice() {
        let result = Pattern::builder("twice").begin(true, 0).begin(false, 0).build();
        assert_eq!(result, Err(PatternError::DuplicateBegin("twice".to_string())));
    }

    #[test]
    fn should_return_error_when_max_not_above_min() {
        let result = Pattern::builder("narrow")
            .begin(true, 0)
            .then(500, 500)
            .end(0)
            .build();
        assert!(matches!(
            result,
            Err(PatternError::InvalidBounds {
                index: 1,
                min: 500,
                max: 500,
                ..
            })
        ));
    }
}
