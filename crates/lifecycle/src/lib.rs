//! Claim lifecycle for the showcase boxes.
//!
//! The controller never reads a clock. Callers pass `now` as an offset from
//! an epoch they own, which keeps every transition reproducible under a
//! virtual clock.

mod controller;
pub mod schedule;

pub use controller::{LifecycleController, LifecycleError, Transition};
