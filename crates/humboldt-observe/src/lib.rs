//! Observability setup for Humboldt Helper: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
