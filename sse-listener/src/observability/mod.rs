//! Observability layer.
//!
//! Canonical structured event names and field helpers for `tracing` output.
//! Library code emits events and never initializes a global subscriber;
//! binaries and tests own one-time subscriber setup at process boundaries.

pub mod events;
pub mod fields;
