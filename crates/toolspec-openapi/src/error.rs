//! Error types for tool specification import.

use thiserror::Error;

/// Result type for tool specification import.
pub type Result<T> = std::result::Result<T, ToolSpecError>;

/// Errors that abort a whole import.
///
/// There is one variant per failure kind and no catch-all. Every variant is fatal: a single malformed operation fails the document.
/// Duplicate parameter names are not errors and surface through
/// [`Warnings`](crate::Warnings) instead.
#[derive(Error, Debug)]
pub enum ToolSpecError {
    /// Plugin manifest is not valid JSON or lacks `api.url` / `api.type`
    #[error("Invalid openai plugin json: {0}")]
    Manifest(String),

    /// Plugin manifest declares an API type other than `openapi`
    #[error("Only openapi is supported now, got api type '{0}'")]
    UnsupportedApiType(String),

    /// Referenced API document could not be retrieved
    #[error("Cannot get openapi yaml from url: {0}")]
    Fetch(String),

    /// Text does not decode to a usable OpenAPI mapping
    #[error("Invalid openapi yaml: {0}")]
    InvalidDocument(String),

    /// Document declares no servers
    #[error("No server found in the openapi yaml")]
    MissingServer,

    /// A `$ref` pointer names a node that does not exist
    #[error("Cannot resolve reference '{reference}': {reason}")]
    Lookup {
        /// The full reference string
        reference: String,
        /// Why the walk stopped
        reason: String,
    },

    /// A required field is missing from the document
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

/// Stable classification of [`ToolSpecError`] for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Manifest,
    UnsupportedApiType,
    Fetch,
    InvalidDocument,
    MissingServer,
    Lookup,
    SchemaViolation,
}

impl ToolSpecError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolSpecError::Manifest(_) => ErrorKind::Manifest,
            ToolSpecError::UnsupportedApiType(_) => ErrorKind::UnsupportedApiType,
            ToolSpecError::Fetch(_) => ErrorKind::Fetch,
            ToolSpecError::InvalidDocument(_) => ErrorKind::InvalidDocument,
            ToolSpecError::MissingServer => ErrorKind::MissingServer,
            ToolSpecError::Lookup { .. } => ErrorKind::Lookup,
            ToolSpecError::SchemaViolation(_) => ErrorKind::SchemaViolation,
        }
    }

    /// Helper for creating lookup errors
    pub(crate) fn lookup(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolSpecError::Lookup {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Helper for creating document shape errors
    pub(crate) fn invalid_document(msg: impl Into<String>) -> Self {
        ToolSpecError::InvalidDocument(msg.into())
    }

    /// Helper for creating schema violations
    pub(crate) fn schema_violation(msg: impl Into<String>) -> Self {
        ToolSpecError::SchemaViolation(msg.into())
    }
}

impl From<reqwest::Error> for ToolSpecError {
    fn from(err: reqwest::Error) -> Self {
        ToolSpecError::Fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ToolSpecError::MissingServer.kind(), ErrorKind::MissingServer);
        assert_eq!(
            ToolSpecError::lookup("#/components/schemas/Foo", "missing").kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            ToolSpecError::UnsupportedApiType("executable".into()).kind(),
            ErrorKind::UnsupportedApiType
        );
    }

    #[test]
    fn test_each_failure_kind_has_its_own_variant() {
        let errors = [
            ToolSpecError::Manifest("bad json".into()),
            ToolSpecError::UnsupportedApiType("executable".into()),
            ToolSpecError::Fetch("timed out".into()),
            ToolSpecError::invalid_document("root is a list"),
            ToolSpecError::MissingServer,
            ToolSpecError::lookup("#/x", "missing"),
            ToolSpecError::schema_violation("no operationId"),
        ];
        let kinds: Vec<ErrorKind> = errors.iter().map(ToolSpecError::kind).collect();
        assert_eq!(
            kinds,
            [
                ErrorKind::Manifest,
                ErrorKind::UnsupportedApiType,
                ErrorKind::Fetch,
                ErrorKind::InvalidDocument,
                ErrorKind::MissingServer,
                ErrorKind::Lookup,
                ErrorKind::SchemaViolation,
            ]
        );
    }

    #[test]
    fn test_lookup_message_names_reference_and_reason() {
        let err = ToolSpecError::lookup("#/components/schemas/Foo", "no node at segment 'Foo'");
        let msg = err.to_string();
        assert!(msg.contains("#/components/schemas/Foo"));
        assert!(msg.contains("segment 'Foo'"));
    }
}
