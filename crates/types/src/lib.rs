//! Core types and data models for Circuit Notifier
//!
//! This crate provides the fundamental data structures shared by the
//! stream, evaluator and integration crates.

pub mod alerts;
pub mod errors;
pub mod events;

pub use alerts::{AlertRequest, AlertSink, Severity};
pub use errors::{NotifierError, Result};
pub use events::CircuitEvent;
