//! Validated in-memory form of an OpenAPI document.
//!
//! The YAML tree is checked once here so the rest of the crate works with
//! typed values instead of probing optional keys. The untyped JSON tree is
//! kept alongside as the target of `$ref` pointers and as the source of each
//! operation's raw metadata.

use crate::error::{Result, ToolSpecError};
use crate::types::HttpMethod;
use serde_json::{Map, Value};
use tracing::debug;

/// A server entry. Only the first one is ever used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub url: String,
}

/// A parsed OpenAPI document.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    pub servers: Vec<Server>,
    /// Paths in document order
    pub paths: Vec<(String, PathItem)>,
    root: Value,
}

/// The operations declared on one path, in [`HttpMethod::ALL`] order.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub operations: Vec<(HttpMethod, Operation)>,
}

/// One API operation.
#[derive(Debug, Clone)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub parameters: Vec<ParameterEntry>,
    /// `requestBody.content` entries in document order; `None` when the
    /// media type declares no schema
    pub request_body: Vec<(String, Option<Schema>)>,
    /// The operation node as written
    pub raw: Value,
}

/// An entry of an operation's `parameters` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterEntry {
    Reference(String),
    Inline(RawParameter),
}

/// An explicit parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub default: Option<String>,
}

/// A request body schema, either a pointer into the document or inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Reference(String),
    Inline(ObjectSchema),
}

/// The parts of an object schema that become tool parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Properties in document order
    pub properties: Vec<(String, PropertySchema)>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySchema {
    pub description: Option<String>,
    pub default: Option<String>,
}

impl ApiDocument {
    /// Decode YAML (or JSON, which YAML accepts) text into a document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| ToolSpecError::invalid_document(e.to_string()))?;
        Self::from_value(yaml_to_json(yaml))
    }

    /// Validate an already decoded tree.
    ///
    /// Servers are checked before any path is looked at: a document without
    /// one fails with [`ToolSpecError::MissingServer`] whatever its paths hold.
    pub fn from_value(root: Value) -> Result<Self> {
        let map = root
            .as_object()
            .ok_or_else(|| ToolSpecError::invalid_document("document root is not a mapping"))?;

        let servers = parse_servers(map.get("servers"))?;
        if servers.is_empty() {
            return Err(ToolSpecError::MissingServer);
        }

        let mut paths = Vec::new();
        match map.get("paths") {
            None | Some(Value::Null) => {}
            Some(Value::Object(entries)) => {
                for (path, item) in entries {
                    paths.push((path.clone(), PathItem::from_value(path, item)?));
                }
            }
            Some(_) => return Err(ToolSpecError::invalid_document("'paths' is not a mapping")),
        }

        debug!("Loaded document with {} servers and {} paths", servers.len(), paths.len());

        Ok(Self {
            servers,
            paths,
            root,
        })
    }

    /// The untyped document tree, used as the `$ref` target.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn first_server(&self) -> Option<&Server> {
        self.servers.first()
    }
}

fn parse_servers(value: Option<&Value>) -> Result<Vec<Server>> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ToolSpecError::invalid_document("'servers' is not a sequence")),
    };

    let mut servers = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry.get("url").and_then(Value::as_str) {
            Some(url) => servers.push(Server {
                url: url.to_string(),
            }),
            // Only servers[0] is consulted, so broken extras are skipped.
            None if index == 0 => {
                return Err(ToolSpecError::invalid_document("first server has no 'url'"));
            }
            None => debug!("Ignoring server entry {} without url", index),
        }
    }
    Ok(servers)
}

impl PathItem {
    fn from_value(path: &str, value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            ToolSpecError::invalid_document(format!("path item '{}' is not a mapping", path))
        })?;

        let mut operations = Vec::new();
        for method in HttpMethod::ALL {
            if let Some(node) = map.get(method.as_str()) {
                let operation = Operation::from_value(node).map_err(|e| match e {
                    ToolSpecError::InvalidDocument(msg) => ToolSpecError::invalid_document(
                        format!("{} {}: {}", method, path, msg),
                    ),
                    other => other,
                })?;
                operations.push((method, operation));
            }
        }
        Ok(Self { operations })
    }
}

impl Operation {
    /// Validate an operation node.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ToolSpecError::invalid_document("operation is not a mapping"))?;

        let parameters = match map.get("parameters") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(ParameterEntry::from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(ToolSpecError::invalid_document("'parameters' is not a sequence")),
        };

        let request_body = match map
            .get("requestBody")
            .and_then(|body| body.get("content"))
        {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(content)) => parse_content(content)?,
            Some(_) => {
                return Err(ToolSpecError::invalid_document(
                    "'requestBody.content' is not a mapping",
                ));
            }
        };

        Ok(Self {
            operation_id: string_field(map, "operationId"),
            summary: string_field(map, "summary"),
            parameters,
            request_body,
            raw: value.clone(),
        })
    }
}

fn parse_content(content: &Map<String, Value>) -> Result<Vec<(String, Option<Schema>)>> {
    content
        .iter()
        .map(|(content_type, media)| {
            if !media.is_object() && !media.is_null() {
                return Err(ToolSpecError::invalid_document(format!(
                    "media type '{}' is not a mapping",
                    content_type
                )));
            }
            let schema = media.get("schema").map(Schema::from_value);
            Ok((content_type.clone(), schema))
        })
        .collect()
}

impl ParameterEntry {
    fn from_value(value: &Value) -> Result<Self> {
        match reference_of(value) {
            Some(reference) => Ok(ParameterEntry::Reference(reference.to_string())),
            None => RawParameter::from_value(value).map(ParameterEntry::Inline),
        }
    }
}

impl RawParameter {
    /// Validate a parameter declaration. A missing or empty `name` is a
    /// schema violation; every other field has a default.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ToolSpecError::invalid_document("parameter is not a mapping"))?;

        let name = string_field(map, "name")
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ToolSpecError::schema_violation("parameter without a 'name'"))?;

        Ok(Self {
            name,
            description: string_field(map, "description").unwrap_or_default(),
            required: map.get("required").and_then(Value::as_bool).unwrap_or(false),
            default: map.get("default").and_then(render_default),
        })
    }
}

impl Schema {
    /// Classify a schema node. Anything that is not a `$ref` is read as an
    /// object schema; non-object nodes contribute no properties.
    pub fn from_value(value: &Value) -> Self {
        match reference_of(value) {
            Some(reference) => Schema::Reference(reference.to_string()),
            None => Schema::Inline(ObjectSchema::from_value(value)),
        }
    }
}

impl ObjectSchema {
    fn from_value(value: &Value) -> Self {
        let properties: Vec<(String, PropertySchema)> = value
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| {
                        let description = prop
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        let default = prop.get("default").and_then(render_default);
                        (name.clone(), PropertySchema {
                            description,
                            default,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let required: Vec<String> = value
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            properties,
            required,
        }
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// The target of a `{"$ref": "..."}` node.
pub(crate) fn reference_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Render a declared default as text. Scalars keep their literal form,
/// structured values become compact JSON.
fn render_default(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Convert a YAML tree to JSON, stringifying non-string mapping keys such as
/// unquoted response codes.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        other => yaml_to_json(other).to_string(),
    }
}
