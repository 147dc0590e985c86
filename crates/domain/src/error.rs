//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GestureError`] via `#[from]`.

/// Top-level error for the proxiwake workspace.
#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    /// Engine construction was rejected.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A pattern definition is malformed.
    #[error("invalid pattern")]
    Pattern(#[from] PatternError),

    /// The proximity sensor could not deliver readings.
    #[error("sensor error")]
    Sensor(#[from] SensorError),
}

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The matcher was given no pattern to recognise.
    #[error("at least one pattern is required")]
    NoPatterns,

    /// The sensor's maximum range must be a positive, finite distance.
    #[error("invalid maximum range {0}")]
    InvalidMaxRange(f32),
}

/// Malformed pattern definitions, reported by
/// [`PatternBuilder::build`](crate::pattern::PatternBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern has no name.
    #[error("pattern name must not be empty")]
    EmptyName,

    /// The pattern has no segment.
    #[error("pattern `{0}` has no segment")]
    EmptyPattern(String),

    /// A segment was appended before the first one was declared with `begin`.
    #[error("pattern `{0}` must start with `begin`")]
    MissingBegin(String),

    /// `begin` was called on a pattern that already has segments.
    #[error("pattern `{0}` can only `begin` once")]
    DuplicateBegin(String),

    /// A bounded segment whose upper bound leaves no admissible duration.
    #[error("pattern `{name}` segment {index}: max {max}ms must exceed min {min}ms")]
    InvalidBounds {
        name: String,
        index: usize,
        min: u64,
        max: u64,
    },
}

/// Failures reported by proximity sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    /// `stop` was called on a source that never started.
    #[error("sensor `{0}` is not started")]
    NotStarted(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_gesture_error() {
        let err: GestureError = ValidationError::NoPatterns.into();
        assert!(matches!(
            err,
            GestureError::Validation(ValidationError::NoPatterns)
        ));
    }

    #[test]
    fn should_convert_pattern_error_into_gesture_error() {
        let err: GestureError = PatternError::EmptyPattern("pocket".to_string()).into();
        assert!(matches!(err, GestureError::Pattern(_)));
    }

    #[test]
    fn should_describe_invalid_bounds() {
        let err = PatternError::InvalidBounds {
            name: "wave".to_string(),
            index: 1,
            min: 500,
            max: 500,
        };
        assert_eq!(
            err.to_string(),
            "pattern `wave` segment 1: max 500ms must exceed min 500ms"
        );
    }
}
