//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the gesture engine and the outside world.
//! They are defined here (in `app`) so that both the engine and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod gesture_sink;
pub mod scheduler;
pub mod sensor;

pub use gesture_sink::GestureSink;
pub use scheduler::Scheduler;
pub use sensor::{ProximitySource, ReadingSink};
