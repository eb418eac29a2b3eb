//! Telemetry stream client
//!
//! This crate maintains the long-lived server-sent-event connection to the
//! circuit breaker telemetry feed. It surfaces connection lifecycle and raw
//! message payloads to a [`StreamHandler`]; no payload parsing happens at
//! this layer.

pub mod client;
pub mod sse;

pub use client::{StreamClient, StreamConfig, StreamError, StreamHandler};
pub use sse::{FrameBuffer, SseFrame};
