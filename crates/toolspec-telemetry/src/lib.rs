//! Telemetry for toolspec
//!
//! Sets up `tracing` with an OpenTelemetry layer and provides span helpers
//! for document parsing and manifest fetching.

pub mod attributes;
pub mod spans;
pub mod tracer;

pub use spans::{document_parse_span, manifest_fetch_span, record_fetch_status, record_parse_result};
pub use tracer::{init_telemetry, tracer_provider};
