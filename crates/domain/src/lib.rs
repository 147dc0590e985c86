//! # proxiwake-domain
//!
//! Pure domain model for the proxiwake gesture engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Samples** (debounced near/far transitions with a timestamp)
//! - Define the bounded **History** of recent samples
//! - Define **Segments** and **Patterns** (timed near/far gesture shapes)
//!   and the pure evaluation of a pattern against a history
//! - Provide the built-in gesture presets (pocket, wave-to-wake)
//! - Convert raw distance readings into near/far transitions (debounce)
//! - Define the **`GestureFired`** event handed to consumers
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Scheduling and notification boundaries are expressed as traits in the
//! `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod history;
pub mod pattern;
pub mod proximity;
pub mod sample;
