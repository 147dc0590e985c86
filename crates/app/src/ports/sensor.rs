//! Sensor port: proximity sources and where their readings go.

use std::future::Future;

use proxiwake_domain::error::GestureError;

use crate::runtime::RuntimeError;

/// Receives raw distance readings from a [`ProximitySource`].
pub trait ReadingSink: Send + Sync {
    /// Forward one raw distance reading.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] once the engine is gone; sources
    /// should stop delivering.
    fn submit_reading(&self, distance: f32) -> Result<(), RuntimeError>;
}

/// A proximity sensor.
///
/// The composition root calls the lifecycle methods in order:
///
/// 1. [`maximum_range`](Self::maximum_range): calibrate the debouncer
/// 2. [`start`](Self::start): register and begin delivering readings
/// 3. [`stop`](Self::stop): unregister
pub trait ProximitySource {
    /// Unique name identifying this source (e.g. `"virtual"`).
    fn name(&self) -> &'static str;

    /// Distance at and beyond which a reading counts as far.
    fn maximum_range(&self) -> f32;

    /// Register with the hardware and deliver readings into `sink` until
    /// stopped.
    fn start<R>(&mut self, sink: R) -> impl Future<Output = Result<(), GestureError>> + Send
    where
        R: ReadingSink + 'static;

    /// Unregister; no reading is delivered afterwards.
    fn stop(&mut self) -> impl Future<Output = Result<(), GestureError>> + Send;
}
