//! Scheduler port: delayed gesture confirmation.

use std::time::Duration;

use proxiwake_domain::id::TimerId;

/// Runs a gesture confirmation after a delay.
///
/// When the delay elapses the implementation must hand the returned
/// [`TimerId`] back to the engine on the same queue that delivers
/// transitions (see [`GestureMatcher::on_fire`](crate::matcher::GestureMatcher::on_fire)).
pub trait Scheduler {
    /// Schedule a confirmation `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a confirmation that has not run yet. Unknown or already
    /// elapsed timers are ignored.
    fn cancel(&mut self, timer: TimerId);
}
