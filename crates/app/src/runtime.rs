//! Gesture runtime: one tokio task serializing readings and timers.
//!
//! The [`ProximityService`] is owned by a single task. Sensor readings,
//! lifecycle requests and elapsed confirmation timers all arrive as
//! [`Command`]s on one unbounded queue, so transitions and gesture
//! confirmations never run concurrently and need no locking.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use proxiwake_domain::error::GestureError;
use proxiwake_domain::id::TimerId;
use proxiwake_domain::pattern::Pattern;
use proxiwake_domain::time::Millis;

use crate::ports::{GestureSink, ReadingSink, Scheduler};
use crate::services::proximity_service::ProximityService;

/// Errors returned by [`RuntimeHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The runtime task has shut down.
    #[error("gesture runtime is closed")]
    Closed,
}

impl<T> From<mpsc::error::SendError<T>> for RuntimeError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::Closed
    }
}

pub(crate) enum Command {
    Start { max_range: f32, at: Millis },
    Reading { distance: f32, at: Millis },
    Fire { timer: TimerId },
    IsNear { reply: oneshot::Sender<bool> },
    Stop,
    Shutdown,
}

/// [`Scheduler`] posting elapsed timers back onto the runtime queue.
///
/// Holds at most one sleeping task; scheduling again or cancelling aborts
/// it. A timer that elapses concurrently with its cancellation still reaches
/// the queue, where the matcher rejects it as stale.
pub struct TokioScheduler {
    commands: mpsc::WeakUnboundedSender<Command>,
    slot: Option<(TimerId, JoinHandle<()>)>,
}

impl TokioScheduler {
    pub(crate) fn new(commands: mpsc::WeakUnboundedSender<Command>) -> Self {
        Self {
            commands,
            slot: None,
        }
    }

    fn abort_slot(&mut self) {
        if let Some((_, task)) = self.slot.take() {
            task.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.abort_slot();
        let timer = TimerId::new();
        let commands = self.commands.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(commands) = commands.upgrade() {
                let _ = commands.send(Command::Fire { timer });
            }
        });
        self.slot = Some((timer, task));
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        if self.slot.as_ref().is_some_and(|(pending, _)| *pending == timer) {
            self.abort_slot();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.abort_slot();
    }
}

/// Cloneable handle feeding the runtime queue.
#[derive(Clone)]
pub struct RuntimeHandle {
    commands: mpsc::UnboundedSender<Command>,
    epoch: Instant,
}

impl RuntimeHandle {
    /// Milliseconds elapsed on the runtime's monotonic clock.
    #[must_use]
    pub fn now(&self) -> Millis {
        elapsed_millis(self.epoch)
    }

    /// Begin sensing for a sensor with the given maximum range.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the runtime has shut down.
    pub fn start(&self, max_range: f32) -> Result<(), RuntimeError> {
        let at = self.now();
        Ok(self.commands.send(Command::Start { max_range, at })?)
    }

    /// Submit a raw distance reading, stamped now.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the runtime has shut down.
    pub fn reading(&self, distance: f32) -> Result<(), RuntimeError> {
        let at = self.now();
        Ok(self.commands.send(Command::Reading { distance, at })?)
    }

    /// Stop sensing and cancel any pending confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the runtime has shut down.
    pub fn stop(&self) -> Result<(), RuntimeError> {
        Ok(self.commands.send(Command::Stop)?)
    }

    /// Ask whether the sensor is currently covered.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the runtime has shut down.
    pub async fn is_near(&self) -> Result<bool, RuntimeError> {
        let (reply, answer) = oneshot::channel();
        self.commands.send(Command::IsNear { reply })?;
        answer.await.map_err(|_| RuntimeError::Closed)
    }
}

impl ReadingSink for RuntimeHandle {
    fn submit_reading(&self, distance: f32) -> Result<(), RuntimeError> {
        self.reading(distance)
    }
}

/// A running gesture engine.
pub struct GestureRuntime {
    handle: RuntimeHandle,
    task: JoinHandle<()>,
}

impl GestureRuntime {
    /// Spawn the engine task recognising `patterns` and notifying `sink`.
    ///
    /// Must be called from within a tokio runtime. The engine starts
    /// stopped; call [`RuntimeHandle::start`] to begin sensing.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Validation`] when `patterns` is empty.
    pub fn spawn<G>(patterns: Vec<Pattern>, sink: G) -> Result<Self, GestureError>
    where
        G: GestureSink + Send + 'static,
    {
        let (commands, queue) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(commands.downgrade());
        let service = ProximityService::new(patterns, scheduler, sink)?;
        let epoch = Instant::now();

        let task = tokio::spawn(run(service, queue, epoch));
        Ok(Self {
            handle: RuntimeHandle { commands, epoch },
            task,
        })
    }

    #[must_use]
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop sensing, drain the queue up to this point and wait for the task.
    pub async fn shutdown(self) {
        let _ = self.handle.commands.send(Command::Shutdown);
        if let Err(err) = self.task.await {
            tracing::warn!(%err, "gesture runtime task failed");
        }
    }
}

async fn run<G: GestureSink>(
    mut service: ProximityService<TokioScheduler, G>,
    mut queue: mpsc::UnboundedReceiver<Command>,
    epoch: Instant,
) {
    while let Some(command) = queue.recv().await {
        match command {
            Command::Start { max_range, at } => {
                if let Err(err) = service.start(at, max_range) {
                    tracing::warn!(%err, max_range, "rejected proximity sensor start");
                }
            }
            Command::Reading { distance, at } => {
                service.on_reading(distance, at);
            }
            Command::Fire { timer } => {
                service.on_fire(timer, elapsed_millis(epoch));
            }
            Command::IsNear { reply } => {
                let _ = reply.send(service.is_near(elapsed_millis(epoch)));
            }
            Command::Stop => service.stop(),
            Command::Shutdown => break,
        }
    }
    service.stop();
    tracing::debug!("gesture runtime stopped");
}

fn elapsed_millis(epoch: Instant) -> Millis {
    Millis::try_from(epoch.elapsed().as_millis()).unwrap_or(Millis::MAX)
}
