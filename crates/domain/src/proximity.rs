//! Proximity debounce: raw distance readings to near/far transitions.
//!
//! Sensors report a distance and advertise a maximum range. A reading
//! below that range (or below one unit, for sensors whose maximum range is
//! unreliable) counts as near. Only changes of the near/far state are
//! forwarded to the gesture engine; the first reading after a reset is
//! always forwarded.

use crate::error::ValidationError;

/// Distance below which a reading is near regardless of the maximum range.
pub const NEAR_FLOOR: f32 = 1.0;

/// Classify a single reading.
#[must_use]
pub fn is_near(distance: f32, max_range: f32) -> bool {
    distance < max_range || distance < NEAR_FLOOR
}

/// Suppresses repeated identical near/far states.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    max_range: f32,
    last: Option<bool>,
}

impl Debouncer {
    /// Create a debouncer for a sensor with the given maximum range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMaxRange`] unless `max_range` is
    /// positive and finite.
    pub fn new(max_range: f32) -> Result<Self, ValidationError> {
        if !max_range.is_finite() || max_range <= 0.0 {
            return Err(ValidationError::InvalidMaxRange(max_range));
        }
        Ok(Self {
            max_range,
            last: None,
        })
    }

    #[must_use]
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// The last forwarded state, `None` before the first reading.
    #[must_use]
    pub fn current(&self) -> Option<bool> {
        self.last
    }

    /// Feed a reading; returns the new state when it must be forwarded.
    pub fn update(&mut self, distance: f32) -> Option<bool> {
        let near = is_near(distance, self.max_range);
        if self.last == Some(near) {
            return None;
        }
        self.last = Some(near);
        Some(near)
    }

    /// Forget the last state so the next reading is always forwarded.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_below_max_range_as_near() {
        assert!(is_near(0.0, 5.0));
        assert!(is_near(4.9, 5.0));
        assert!(!is_near(5.0, 5.0));
    }

    #[test]
    fn should_classify_below_floor_as_near_when_range_is_tiny() {
        assert!(is_near(0.5, 0.1));
        assert!(!is_near(1.0, 0.1));
    }

    #[test]
    fn should_forward_first_reading() {
        let mut debouncer = Debouncer::new(5.0).unwrap();
        assert_eq!(debouncer.update(8.0), Some(false));
        assert_eq!(debouncer.current(), Some(false));
    }

    #[test]
    fn should_suppress_unchanged_state() {
        let mut debouncer = Debouncer::new(5.0).unwrap();
        debouncer.update(0.0);
        assert_eq!(debouncer.update(2.0), None);
        assert_eq!(debouncer.update(4.0), None);
    }

    #[test]
    fn should_forward_each_change() {
        let mut debouncer = Debouncer::new(5.0).unwrap();
        let forwarded: Vec<_> = [0.0, 0.0, 8.0, 8.0, 3.0]
            .into_iter()
            .filter_map(|d| debouncer.update(d))
            .collect();
        assert_eq!(forwarded, vec![true, false, true]);
    }

    #[test]
    fn should_forward_repeated_state_after_reset() {
        let mut debouncer = Debouncer::new(5.0).unwrap();
        debouncer.update(0.0);
        debouncer.reset();
        assert_eq!(debouncer.update(0.0), Some(true));
    }

    #[test]
    fn should_reject_non_positive_max_range() {
        assert_eq!(
            Debouncer::new(0.0),
            Err(ValidationError::InvalidMaxRange(0.0))
        );
        assert!(Debouncer::new(f32::NAN).is_err());
    }
}
