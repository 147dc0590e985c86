//! Proximity service: turns raw sensor readings into gestures.
//!
//! Composes the [`Debouncer`] and the [`GestureMatcher`] and owns the
//! sensing lifecycle together with the current near/far state.

use proxiwake_domain::error::GestureError;
use proxiwake_domain::event::GestureFired;
use proxiwake_domain::id::TimerId;
use proxiwake_domain::pattern::Pattern;
use proxiwake_domain::proximity::{self, Debouncer};
use proxiwake_domain::sample::Sample;
use proxiwake_domain::time::{Millis, elapsed};

use crate::matcher::GestureMatcher;
use crate::ports::{GestureSink, Scheduler};

/// How long the last near/far transition stays authoritative once
/// sensing has stopped.
pub const LAST_EVENT_MAX_AGE: Millis = 1000;

/// Application service for a single proximity sensor.
pub struct ProximityService<S, G> {
    matcher: GestureMatcher<S, G>,
    debouncer: Option<Debouncer>,
    attached: bool,
    near: bool,
    last_event: Option<Millis>,
}

impl<S, G> ProximityService<S, G>
where
    S: Scheduler,
    G: GestureSink,
{
    /// Create a stopped service recognising `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Validation`] when `patterns` is empty.
    pub fn new(patterns: Vec<Pattern>, scheduler: S, sink: G) -> Result<Self, GestureError> {
        Ok(Self {
            matcher: GestureMatcher::new(patterns, scheduler, sink)?,
            debouncer: None,
            attached: false,
            near: false,
            last_event: None,
        })
    }

    #[must_use]
    pub fn matcher(&self) -> &GestureMatcher<S, G> {
        &self.matcher
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Begin sensing at `now` for a sensor reporting `max_range`.
    ///
    /// The history restarts from a single far baseline at `now` and the
    /// next reading is always forwarded.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Validation`] if `max_range` is not a positive
    /// finite distance. The service stays stopped in that case.
    pub fn start(&mut self, now: Millis, max_range: f32) -> Result<(), GestureError> {
        let debouncer = Debouncer::new(max_range)?;
        tracing::debug!(max_range, now, "starting proximity sensing");
        self.debouncer = Some(debouncer);
        self.matcher.reset(Sample::far(now));
        self.last_event = None;
        self.attached = true;
        Ok(())
    }

    /// Stop sensing. A pending confirmation is cancelled; the history is
    /// left as-is.
    pub fn stop(&mut self) {
        tracing::debug!("stopping proximity sensing");
        self.matcher.cancel_pending();
        self.attached = false;
    }

    /// Feed a raw distance reading taken at `now`.
    ///
    /// Returns the new near/far state when the reading changed it (or is
    /// the first since [`start`](Self::start)); such readings are forwarded
    /// to the matcher. Readings while stopped are dropped.
    pub fn on_reading(&mut self, distance: f32, now: Millis) -> Option<bool> {
        if !self.attached {
            tracing::trace!(distance, "dropping reading while stopped");
            return None;
        }
        let debouncer = self.debouncer.as_mut()?;
        let is_near = proximity::is_near(distance, debouncer.max_range());
        let changed = debouncer.update(distance);

        match self.since_last_event(now) {
            Some(delta) => tracing::debug!(
                distance,
                is_near,
                changed = changed.is_some(),
                delta,
                "proximity reading"
            ),
            None => tracing::debug!(
                distance,
                is_near,
                changed = changed.is_some(),
                "proximity reading, first_event"
            ),
        }

        let is_near = changed?;
        self.near = is_near;
        self.last_event = Some(now);
        self.matcher.on_transition(is_near, now);
        Some(is_near)
    }

    /// Time since the last forwarded transition, `None` before the first
    /// one since [`start`](Self::start).
    #[must_use]
    pub fn since_last_event(&self, now: Millis) -> Option<Millis> {
        self.last_event.map(|last| elapsed(last, now))
    }

    /// Forward an elapsed confirmation timer to the matcher.
    pub fn on_fire(&mut self, timer: TimerId, now: Millis) -> Option<GestureFired> {
        self.matcher.on_fire(timer, now)
    }

    /// Whether the sensor is covered at `now`.
    ///
    /// While sensing, this is the last debounced state. After stopping, that
    /// state is trusted for [`LAST_EVENT_MAX_AGE`] past the last transition.
    #[must_use]
    pub fn is_near(&self, now: Millis) -> bool {
        let recent = self
            .last_event
            .is_some_and(|last| elapsed(last, now) < LAST_EVENT_MAX_AGE);
        (recent || self.attached) && self.near
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::tests::{FakeScheduler, SpySink};
    use proxiwake_domain::error::ValidationError;
    use proxiwake_domain::pattern::presets;
    use std::sync::Arc;

    const MAX_RANGE: f32 = 5.0;
    const NEAR: f32 = 0.0;
    const FAR: f32 = 5.0;

    fn make_service() -> ProximityService<FakeScheduler, Arc<SpySink>> {
        ProximityService::new(
            presets::defaults(),
            FakeScheduler::default(),
            Arc::new(SpySink::default()),
        )
        .unwrap()
    }

    fn started_service() -> ProximityService<FakeScheduler, Arc<SpySink>> {
        let mut service = make_service();
        service.start(0, MAX_RANGE).unwrap();
        service
    }

    #[test]
    fn should_start_detached() {
        let service = make_service();
        assert!(!service.is_attached());
        assert!(!service.is_near(0));
    }

    #[test]
    fn should_seed_far_baseline_on_start() {
        let mut service = make_service();
        service.start(1200, MAX_RANGE).unwrap();

        assert!(service.is_attached());
        assert_eq!(service.matcher().history().as_slice(), &[Sample::far(1200)]);
    }

    #[test]
    fn should_reject_invalid_max_range() {
        let mut service = make_service();
        let result = service.start(0, -1.0);

        assert!(matches!(
            result,
            Err(GestureError::Validation(ValidationError::InvalidMaxRange(_)))
        ));
        assert!(!service.is_attached());
    }

    #[test]
    fn should_drop_readings_while_stopped() {
        let mut service = make_service();
        assert_eq!(service.on_reading(NEAR, 10), None);
        assert!(service.matcher().history().is_empty());
    }

    #[test]
    fn should_forward_first_reading_even_if_far() {
        let mut service = started_service();
        assert_eq!(service.on_reading(FAR, 10), Some(false));
        assert_eq!(service.matcher().history().len(), 2);
    }

    #[test]
    fn should_suppress_repeated_state() {
        let mut service = started_service();
        service.on_reading(NEAR, 10);

        assert_eq!(service.on_reading(0.5, 20), None);
        assert_eq!(service.matcher().history().len(), 2);
    }

    #[test]
    fn should_detect_pocket_from_readings() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        service.on_reading(FAR, 3500);

        let timer = service.matcher().scheduler().last_timer();
        let event = service.on_fire(timer, 3500).unwrap();

        assert_eq!(event.pattern, presets::POCKET);
        assert_eq!(service.matcher().sink().patterns(), vec![presets::POCKET]);
    }

    #[test]
    fn should_detect_wave_from_readings() {
        let mut service = started_service();
        for (distance, now) in [(NEAR, 100), (FAR, 400), (NEAR, 700), (FAR, 900)] {
            service.on_reading(distance, now);
        }

        assert_eq!(
            service.matcher().pending().unwrap().pattern,
            presets::WAVE_TO_WAKE
        );
    }

    #[test]
    fn should_cancel_pending_on_stop() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        service.on_reading(FAR, 3500);

        service.stop();

        assert!(service.matcher().pending().is_none());
        assert_eq!(service.matcher().scheduler().cancelled.len(), 1);
        assert!(!service.is_attached());
    }

    #[test]
    fn should_report_near_while_attached() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        assert!(service.is_near(60_000));
    }

    #[test]
    fn should_trust_last_state_briefly_after_stop() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        service.stop();

        assert!(service.is_near(1099));
        assert!(!service.is_near(1100));
    }

    #[test]
    fn should_report_far_after_far_reading() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        service.on_reading(FAR, 200);
        assert!(!service.is_near(200));
    }

    #[test]
    fn should_forward_first_reading_after_restart() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        service.stop();
        service.start(5000, MAX_RANGE).unwrap();

        assert_eq!(service.on_reading(NEAR, 5100), Some(true));
    }

    #[test]
    fn should_have_no_previous_event_after_start() {
        let mut service = started_service();
        assert_eq!(service.since_last_event(10), None);

        service.on_reading(NEAR, 10);
        service.stop();
        service.start(2000, MAX_RANGE).unwrap();
        assert_eq!(service.since_last_event(2010), None);
    }

    #[test]
    fn should_measure_from_last_transition_after_gesture_fired() {
        let mut service = started_service();
        service.on_reading(NEAR, 100);
        service.on_reading(FAR, 3500);
        let timer = service.matcher().scheduler().last_timer();
        service.on_fire(timer, 3500).unwrap();

        assert!(service.matcher().history().is_empty());
        assert_eq!(service.since_last_event(3600), Some(100));
    }
}
