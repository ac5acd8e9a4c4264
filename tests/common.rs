//! Common test utilities and helpers

#![allow(dead_code)]

use std::fmt::Write;

/// Install the telemetry subscriber once; later calls are no-ops.
pub fn init_tracing() {
    toolspec_telemetry::init_telemetry();
}

/// Build an OpenAPI document with one server and the given paths, each path
/// declaring the listed methods with generated operation ids.
///
/// Methods are written in the order given so callers can check that output
/// order does not depend on it.
pub fn document_with_methods(paths: &[(&str, &[&str])]) -> String {
    let mut yaml = String::from("openapi: 3.0.0\nservers:\n  - url: https://api.example.com\npaths:\n");
    for (path, methods) in paths {
        writeln!(yaml, "  {}:", path).unwrap();
        for method in *methods {
            let id = format!("{}{}", method, path.replace(['/', '{', '}'], "_"));
            writeln!(yaml, "    {}:\n      operationId: {}", method, id).unwrap();
        }
    }
    yaml
}

/// A plugin manifest pointing at `url`.
pub fn manifest(api_type: &str, url: &str) -> String {
    serde_json::json!({
        "schema_version": "v1",
        "name_for_model": "todo",
        "api": {"type": api_type, "url": url, "is_user_authenticated": false}
    })
    .to_string()
}
