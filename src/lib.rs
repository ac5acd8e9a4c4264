//! Toolspec workspace facade
//!
//! Re-exports the importer and telemetry crates so applications can depend
//! on a single package.

pub use toolspec_openapi::*;
pub use toolspec_telemetry as telemetry;
