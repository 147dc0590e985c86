//! # proxiwake-adapter-virtual
//!
//! Virtual proximity sensor that replays a [`Script`] of distance readings,
//! for testing and demonstration.
//!
//! ## Built-in scripts
//!
//! | Script | Readings | Expected gesture |
//! |--------|----------|------------------|
//! | `wave` | far, then near/far/near/far 300ms apart | `wave_to_wake` |
//! | `pocket` | near, far 3.5s later | `pocket` |
//! | `idle` | far every second | none |
//!
//! ## Dependency rule
//!
//! Depends on `proxiwake-app` (port traits) and `proxiwake-domain` only.

mod script;

pub use script::{NEAR_DISTANCE, Script, ScriptStep};

use std::time::Duration;

use tokio::task::JoinHandle;

use proxiwake_app::ports::{ProximitySource, ReadingSink};
use proxiwake_domain::error::{GestureError, SensorError};

const NAME: &str = "virtual";

/// A [`ProximitySource`] replaying scripted readings on a background task.
pub struct ScriptedSensor {
    max_range: f32,
    script: Script,
    task: Option<JoinHandle<()>>,
}

impl ScriptedSensor {
    #[must_use]
    pub fn new(max_range: f32, script: Script) -> Self {
        Self {
            max_range,
            script,
            task: None,
        }
    }

    #[must_use]
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Whether the script is still being replayed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl ProximitySource for ScriptedSensor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn maximum_range(&self) -> f32 {
        self.max_range
    }

    async fn start<R>(&mut self, sink: R) -> Result<(), GestureError>
    where
        R: ReadingSink + 'static,
    {
        if let Some(previous) = self.task.take() {
            previous.abort();
        }

        let steps = self.script.steps().to_vec();
        tracing::info!(sensor = NAME, steps = steps.len(), "replaying proximity script");

        self.task = Some(tokio::spawn(async move {
            for step in steps {
                tokio::time::sleep(Duration::from_millis(step.after_ms)).await;
                if let Err(err) = sink.submit_reading(step.distance) {
                    tracing::warn!(%err, sensor = NAME, "engine closed, abandoning script");
                    return;
                }
                tracing::trace!(sensor = NAME, distance = step.distance, "reading delivered");
            }
            tracing::debug!(sensor = NAME, "script finished");
        }));
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), GestureError> {
        let task = self.task.take().ok_or(SensorError::NotStarted(NAME))?;
        task.abort();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxiwake_app::runtime::RuntimeError;
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;

    #[derive(Clone, Default)]
    struct RecordingSink {
        readings: Arc<Mutex<Vec<f32>>>,
        closed: bool,
    }

    impl ReadingSink for RecordingSink {
        fn submit_reading(&self, distance: f32) -> Result<(), RuntimeError> {
            if self.closed {
                return Err(RuntimeError::Closed);
            }
            self.readings.lock().unwrap().push(distance);
            Ok(())
        }
    }

    impl RecordingSink {
        fn readings(&self) -> Vec<f32> {
            self.readings.lock().unwrap().clone()
        }
    }

    #[test]
    fn should_return_virtual_as_name() {
        let sensor = ScriptedSensor::new(5.0, Script::default());
        assert_eq!(sensor.name(), "virtual");
        assert!((sensor.maximum_range() - 5.0).abs() < f32::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn should_replay_script_in_order() {
        let mut sensor = ScriptedSensor::new(5.0, Script::wave(5.0));
        let sink = RecordingSink::default();

        sensor.start(sink.clone()).await.unwrap();
        sleep(Duration::from_millis(1300)).await;

        assert_eq!(sink.readings(), vec![5.0, 0.0, 5.0, 0.0, 5.0]);
        assert!(!sensor.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn should_respect_step_delays() {
        let mut sensor = ScriptedSensor::new(5.0, Script::pocket(5.0));
        let sink = RecordingSink::default();

        sensor.start(sink.clone()).await.unwrap();
        sleep(Duration::from_millis(3000)).await;

        assert_eq!(sink.readings(), vec![0.0]);
        assert!(sensor.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_delivering_after_stop() {
        let mut sensor = ScriptedSensor::new(5.0, Script::pocket(5.0));
        let sink = RecordingSink::default();

        sensor.start(sink.clone()).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        sensor.stop().await.unwrap();
        sleep(Duration::from_millis(5000)).await;

        assert_eq!(sink.readings(), vec![0.0]);
    }

    #[tokio::test]
    async fn should_return_not_started_when_never_started() {
        let mut sensor = ScriptedSensor::new(5.0, Script::idle(5.0));
        let result = sensor.stop().await;
        assert!(matches!(
            result,
            Err(GestureError::Sensor(SensorError::NotStarted("virtual")))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn should_abandon_script_when_engine_closed() {
        let mut sensor = ScriptedSensor::new(5.0, Script::idle(5.0));
        let sink = RecordingSink {
            closed: true,
            ..RecordingSink::default()
        };

        sensor.start(sink.clone()).await.unwrap();
        sleep(Duration::from_millis(10)).await;

        assert!(sink.readings().is_empty());
        assert!(!sensor.is_running());
    }
}
