//! Local `$ref` resolution.

use crate::config::ReferenceMode;
use crate::document::{
    reference_of, ApiDocument, Operation, ParameterEntry, RawParameter, Schema,
};
use crate::error::{Result, ToolSpecError};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A request body media type after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub content_type: String,
    pub schema: Option<Schema>,
}

/// Resolves `#/...` pointers against a document's tree.
pub struct ReferenceResolver<'a> {
    root: &'a Value,
    mode: ReferenceMode,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(document: &'a ApiDocument, mode: ReferenceMode) -> Self {
        Self {
            root: document.root(),
            mode,
        }
    }

    /// Walk the document root through each segment of `reference`.
    ///
    /// Only local pointers are accepted. Segments are JSON-pointer unescaped
    /// and index into sequences when the current node is one.
    pub fn lookup(&self, reference: &str) -> Result<&'a Value> {
        let pointer = reference
            .strip_prefix("#/")
            .ok_or_else(|| ToolSpecError::lookup(reference, "only local '#/' references are supported"))?;

        let mut node = self.root;
        for raw_segment in pointer.split('/') {
            let segment = raw_segment.replace("~1", "/").replace("~0", "~");
            let next = match node {
                Value::Object(map) => map.get(&segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            node = next.ok_or_else(|| {
                ToolSpecError::lookup(reference, format!("no node at segment '{}'", segment))
            })?;
        }
        Ok(node)
    }

    /// Resolve a reference according to the configured [`ReferenceMode`].
    pub fn resolve(&self, reference: &str) -> Result<&'a Value> {
        let mut node = self.lookup(reference)?;
        if self.mode == ReferenceMode::SingleLevel {
            return Ok(node);
        }

        let mut seen = HashSet::from([reference.to_string()]);
        while let Some(next) = reference_of(node) {
            if !seen.insert(next.to_string()) {
                return Err(ToolSpecError::lookup(
                    reference,
                    format!("reference cycle through '{}'", next),
                ));
            }
            debug!("Following chained reference {} -> {}", reference, next);
            node = self.lookup(next)?;
        }
        Ok(node)
    }

    /// Resolve a parameter entry into its declaration.
    pub fn resolve_parameter(&self, entry: &ParameterEntry) -> Result<RawParameter> {
        match entry {
            ParameterEntry::Inline(param) => Ok(param.clone()),
            ParameterEntry::Reference(reference) => RawParameter::from_value(self.resolve(reference)?),
        }
    }

    /// Resolve every request body schema of `operation`.
    ///
    /// Each resolved target is also written over the schema in `raw`, so the
    /// retained operation metadata carries the resolved nodes.
    pub fn resolve_request_body(
        &self,
        operation: &Operation,
        raw: &mut Value,
    ) -> Result<Vec<ResolvedContent>> {
        let mut resolved = Vec::with_capacity(operation.request_body.len());

        for (content_type, schema) in &operation.request_body {
            let schema = match schema {
                Some(Schema::Reference(reference)) => {
                    let target = self.resolve(reference)?;
                    if let Some(slot) = raw
                        .pointer_mut(&content_schema_pointer(content_type))
                    {
                        *slot = target.clone();
                    }

                    let schema = Schema::from_value(target);
                    if let Schema::Reference(chained) = &schema {
                        warn!(
                            "Schema for '{}' resolves to another reference '{}', which is not followed",
                            content_type, chained
                        );
                    }
                    Some(schema)
                }
                other => other.clone(),
            };

            resolved.push(ResolvedContent {
                content_type: content_type.clone(),
                schema,
            });
        }

        Ok(resolved)
    }
}

fn content_schema_pointer(content_type: &str) -> String {
    let escaped = content_type.replace('~', "~0").replace('/', "~1");
    format!("/requestBody/content/{}/schema", escaped)
}
