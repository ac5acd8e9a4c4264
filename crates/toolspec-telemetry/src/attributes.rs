//! Span attribute keys.

/// Instrumentation scope name reported to OpenTelemetry.
pub const SYSTEM_NAME: &str = "toolspec";

pub const TOOLSPEC_PATH_COUNT: &str = "toolspec.document.path_count";
pub const TOOLSPEC_BUNDLE_COUNT: &str = "toolspec.parse.bundle_count";
pub const TOOLSPEC_WARNING_COUNT: &str = "toolspec.parse.warning_count";
pub const TOOLSPEC_MANIFEST_URL: &str = "toolspec.manifest.url";
pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";
