//! Single-threaded runtime services for Floatmode.
//!
//! The only service the panel needs is "run this closure after N milliseconds,
//! on the same thread". The host drives the clock explicitly, which keeps
//! tests deterministic.

mod scheduler;

pub use scheduler::{Scheduler, TaskId, TaskRegistration};
