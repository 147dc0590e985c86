//! Built-in gestures.

use super::{Pattern, Segment};

/// Name of the [`pocket`] gesture.
pub const POCKET: &str = "pocket";

/// Name of the [`wave_to_wake`] gesture.
pub const WAVE_TO_WAKE: &str = "wave_to_wake";

/// Covered for more than three seconds, then uncovered.
#[must_use]
pub fn pocket() -> Pattern {
    Pattern {
        name: POCKET.to_string(),
        segments: vec![
            Segment::new(true, 3000, None),
            Segment::new(false, 0, None),
        ],
    }
}

/// Near for more than 200ms, far then near again each for under a
/// second, then far.
#[must_use]
pub fn wave_to_wake() -> Pattern {
    Pattern {
        name: WAVE_TO_WAKE.to_string(),
        segments: vec![
            Segment::new(true, 200, None),
            Segment::new(false, 0, Some(1000)),
            Segment::new(true, 0, Some(1000)),
            Segment::new(false, 0, None),
        ],
    }
}

/// The default gesture set, wave-to-wake first.
#[must_use]
pub fn defaults() -> Vec<Pattern> {
    vec![wave_to_wake(), pocket()]
}

/// Look up a built-in gesture by name.
#[must_use]
pub fn by_name(name: &str) -> Option<Pattern> {
    match name {
        POCKET => Some(pocket()),
        WAVE_TO_WAKE => Some(wave_to_wake()),
        _ => None,
    }
}
