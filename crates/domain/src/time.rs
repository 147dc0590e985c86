//! Time and timestamp helpers.
//!
//! Gesture timing runs on a monotonic millisecond clock ([`Millis`]);
//! wall-clock [`Timestamp`]s only annotate events for consumers.

use chrono::{DateTime, Utc};

/// Monotonic time or duration in milliseconds.
pub type Millis = u64;

/// UTC timestamp attached to emitted events.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Elapsed time from `earlier` to `later`, zero if the clock went backwards.
#[must_use]
pub fn elapsed(earlier: Millis, later: Millis) -> Millis {
    later.saturating_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_compute_elapsed_time() {
        assert_eq!(elapsed(100, 350), 250);
    }

    #[test]
    fn should_saturate_when_clock_goes_backwards() {
        assert_eq!(elapsed(350, 100), 0);
    }
}
