//! Parse results.

use crate::types::ToolBundle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Warnings key written by duplicate parameter detection.
pub const DUPLICATED_PARAMETER: &str = "duplicated_parameter";

/// Non-fatal notices gathered during one parse, keyed by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Warnings(BTreeMap<String, String>);

impl Warnings {
    /// Set `key`, replacing any earlier message under it.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

/// The tool bundles of one document, in enumeration order, with the warnings
/// raised while building them.
///
/// # Example
///
/// ```
/// use toolspec_openapi::{ParserConfig, ToolSpecImporter};
///
/// let spec = r#"
/// servers:
///   - url: https://api.example.com
/// paths:
///   /users:
///     get:
///       operationId: listUsers
///       summary: List all users
/// "#;
///
/// let outcome = ToolSpecImporter::new(ParserConfig::default())?.parse_openapi_yaml(spec)?;
/// assert_eq!(outcome.operation_ids(), ["listUsers"]);
/// assert!(outcome.warnings.is_empty());
/// # Ok::<(), toolspec_openapi::ToolSpecError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseOutcome {
    pub bundles: Vec<ToolBundle>,
    pub warnings: Warnings,
}

impl ParseOutcome {
    /// Get a bundle by operation id.
    pub fn get(&self, operation_id: &str) -> Option<&ToolBundle> {
        self.bundles.iter().find(|b| b.operation_id == operation_id)
    }

    /// Operation ids of all bundles, in order.
    pub fn operation_ids(&self) -> Vec<&str> {
        self.bundles.iter().map(|b| b.operation_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
