//! # proxiwake-app
//!
//! Application layer: the gesture engine and its **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** for the engine's collaborators:
//!   - `Scheduler`: run a confirmation after a delay, cancel it
//!   - `GestureSink`: consumer notified when a gesture fires
//!   - `ProximitySource` / `ReadingSink`: sensors feeding raw readings
//! - Provide the **`GestureMatcher`**: history upkeep, pattern evaluation
//!   and the single pending confirmation
//! - Provide the **`ProximityService`**: debounce, lifecycle and near state
//! - Provide **in-process infrastructure**: the `GestureBus` broadcast and
//!   the single-queue tokio `GestureRuntime`
//!
//! ## Dependency rule
//! Depends on `proxiwake-domain` only (plus `tokio` for the runtime).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod gesture_bus;
pub mod matcher;
pub mod ports;
pub mod runtime;
pub mod services;
