//! Gesture matcher: classifies debounced transitions into gestures.
//!
//! Each transition is appended to the bounded [`History`] and every
//! registered [`Pattern`] is evaluated against it. A match does not fire
//! right away: the terminal state must first hold for the pattern's final
//! minimum, so the matcher asks its [`Scheduler`] for a confirmation and
//! keeps a single pending slot. Any later transition cancels that slot.

use std::time::Duration;

use proxiwake_domain::error::{GestureError, ValidationError};
use proxiwake_domain::event::GestureFired;
use proxiwake_domain::history::History;
use proxiwake_domain::id::TimerId;
use proxiwake_domain::pattern::{MatchOutcome, Pattern};
use proxiwake_domain::sample::Sample;
use proxiwake_domain::time::Millis;

use crate::ports::{GestureSink, Scheduler};

/// The confirmation currently awaiting its timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub timer: TimerId,
    /// Name of the matched pattern.
    pub pattern: String,
    /// Engine time at which the confirmation is due.
    pub due: Millis,
}

/// Incremental pattern matcher owning the history and the pending slot.
///
/// Not meant for concurrent use: transitions and timer callbacks must be
/// delivered from one queue.
pub struct GestureMatcher<S, G> {
    patterns: Vec<Pattern>,
    history: History,
    pending: Option<Pending>,
    scheduler: S,
    sink: G,
}

impl<S, G> GestureMatcher<S, G>
where
    S: Scheduler,
    G: GestureSink,
{
    /// Create a matcher recognising `patterns`.
    ///
    /// The history keeps as many samples as the longest pattern has segments.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPatterns`] when `patterns` is empty.
    pub fn new(patterns: Vec<Pattern>, scheduler: S, sink: G) -> Result<Self, GestureError> {
        let capacity = patterns
            .iter()
            .map(Pattern::len)
            .max()
            .ok_or(ValidationError::NoPatterns)?;

        Ok(Self {
            patterns,
            history: History::with_capacity(capacity),
            pending: None,
            scheduler,
            sink,
        })
    }

    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn sink(&self) -> &G {
        &self.sink
    }

    /// Process one debounced transition.
    ///
    /// Cancels the pending confirmation, appends the sample and evaluates
    /// every pattern. When several patterns match, the one confirming
    /// soonest is scheduled (the earliest-registered on ties). Returns the
    /// scheduled pattern, if any.
    pub fn on_transition(&mut self, is_near: bool, timestamp: Millis) -> Option<&Pattern> {
        self.cancel_pending();
        self.history.append(Sample::new(is_near, timestamp));

        let mut best: Option<(usize, Millis)> = None;
        for (index, pattern) in self.patterns.iter().enumerate() {
            if let MatchOutcome::Fire { after } = pattern.evaluate(&self.history)
                && best.is_none_or(|(_, soonest)| after < soonest)
            {
                best = Some((index, after));
            }
        }

        let (index, after) = best?;
        let pattern = &self.patterns[index];
        let timer = self.scheduler.schedule(Duration::from_millis(after));
        tracing::info!(
            pattern = pattern.name(),
            after_ms = after,
            %timer,
            "gesture matched, confirmation scheduled"
        );
        self.pending = Some(Pending {
            timer,
            pattern: pattern.name().to_string(),
            due: timestamp.saturating_add(after),
        });
        Some(pattern)
    }

    /// Confirm the gesture behind `timer`.
    ///
    /// Timers that are no longer pending (superseded or cancelled) are
    /// ignored. Otherwise the history is cleared, so the same samples cannot
    /// fire again, and the sink is notified.
    pub fn on_fire(&mut self, timer: TimerId, now: Millis) -> Option<GestureFired> {
        if self.pending.as_ref().is_none_or(|p| p.timer != timer) {
            tracing::debug!(%timer, "ignoring stale gesture confirmation");
            return None;
        }
        let pending = self.pending.take()?;

        self.history.clear();
        let event = GestureFired::new(pending.pattern, now);
        tracing::info!(pattern = %event.pattern, timestamp = now, "gesture fired");
        self.sink.gesture_fired(event.clone());
        Some(event)
    }

    /// Cancel the pending confirmation, if any. The history is kept.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.timer);
            tracing::debug!(
                pattern = %pending.pattern,
                timer = %pending.timer,
                "pending gesture cancelled"
            );
        }
    }

    /// Cancel the pending confirmation and restart the history from
    /// `baseline`.
    pub fn reset(&mut self, baseline: Sample) {
        self.cancel_pending();
        self.history.reset(baseline);
    }
}
