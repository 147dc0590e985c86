//! # proxiwaked: proxiwake daemon
//!
//! Composition root that wires a proximity sensor to the gesture runtime
//! and reports detected gestures.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Construct the gesture runtime, injecting patterns and the gesture bus
//! - Start the sensor (the virtual, scripted one) and feed the runtime
//! - Log every gesture fired
//! - Stop on script completion or SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use proxiwake_adapter_virtual::ScriptedSensor;
use proxiwake_app::gesture_bus::GestureBus;
use proxiwake_app::ports::ProximitySource;
use proxiwake_app::runtime::GestureRuntime;
use proxiwake_domain::event::GestureFired;

use crate::config::{Config, ConfigError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let patterns = config.patterns()?;
    for pattern in &patterns {
        tracing::info!(%pattern, "registered gesture");
    }

    // Gesture bus
    let bus = Arc::new(GestureBus::new(64));
    let reporter = tokio::spawn(report(bus.subscribe()));

    // Runtime
    let runtime = GestureRuntime::spawn(patterns, Arc::clone(&bus))?;
    let handle = runtime.handle();

    // Sensor
    let script = config.script().ok_or_else(|| {
        ConfigError::Validation(format!("unknown script `{}`", config.sensor.script))
    })?;
    let session = script.duration() + Duration::from_millis(config.session.linger_ms);
    let mut sensor = ScriptedSensor::new(config.sensor.max_range, script);

    handle.start(sensor.maximum_range())?;
    sensor.start(handle.clone()).await?;
    tracing::info!(sensor = sensor.name(), script = %config.sensor.script, "proxiwaked sensing");

    tokio::select! {
        () = tokio::time::sleep(session) => {}
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    sensor.stop().await?;
    handle.stop()?;
    runtime.shutdown().await;

    drop(bus);
    let count = reporter.await?;
    tracing::info!(gestures = count, "proxiwaked stopped");

    Ok(())
}

/// Log gestures until the bus closes; returns how many were seen.
async fn report(mut gestures: broadcast::Receiver<GestureFired>) -> usize {
    let mut count = 0;
    loop {
        match gestures.recv().await {
            Ok(event) => {
                count += 1;
                tracing::info!(
                    pattern = %event.pattern,
                    timestamp = event.timestamp,
                    detected_at = %event.detected_at,
                    "gesture detected"
                );
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "gesture reporter lagging");
            }
            Err(broadcast::error::RecvError::Closed) => return count,
        }
    }
}
