//! Event: emitted when a gesture is confirmed.

use serde::{Deserialize, Serialize};

use crate::id::GestureEventId;
use crate::time::{Millis, Timestamp};

/// A gesture completed and held long enough to be confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureFired {
    pub id: GestureEventId,
    /// Name of the pattern that completed.
    pub pattern: String,
    /// Engine clock at confirmation.
    pub timestamp: Millis,
    /// Wall clock at confirmation.
    pub detected_at: Timestamp,
}

impl GestureFired {
    /// Create a new event stamped with the current wall-clock time.
    #[must_use]
    pub fn new(pattern: impl Into<String>, timestamp: Millis) -> Self {
        Self {
            id: GestureEventId::new(),
            pattern: pattern.into(),
            timestamp,
            detected_at: crate::time::now(),
        }
    }
}
