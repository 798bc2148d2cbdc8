//! Observability: metrics events routed to an injected sink.
//!
//! Structured logging goes through `tracing` at the call sites; this module
//! only carries counters.

pub mod sink;
