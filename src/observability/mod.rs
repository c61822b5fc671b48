//! Observability infrastructure.
//!
//! Provides:
//! - Structured logging through `tracing`
//! - OpenTelemetry counters for registrations, logins and ticket activity

pub mod metrics;
pub mod tracing;
