//! OpenAPI document to tool bundle conversion.
//!
//! Walks every path and method into an ordered list of interfaces, then turns
//! each interface into a [`ToolBundle`]. The walk is pure: all I/O happens in
//! the [`loader`](crate::loader) before a document reaches this module.

use crate::config::ResolutionConfig;
use crate::detector::detect_duplicates;
use crate::document::{ApiDocument, Operation};
use crate::error::{Result, ToolSpecError};
use crate::extractor::ParameterExtractor;
use crate::outcome::{ParseOutcome, Warnings};
use crate::resolver::ReferenceResolver;
use crate::types::{HttpMethod, ToolBundle};
use tracing::{debug, info};

/// One operation found while walking the document.
#[derive(Debug, Clone, Copy)]
pub struct Interface<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

/// Parser for a loaded OpenAPI document.
pub struct OpenApiParser {
    document: ApiDocument,
    resolution: ResolutionConfig,
}

impl OpenApiParser {
    /// Create a parser with the default resolution settings.
    pub fn new(document: ApiDocument) -> Self {
        Self::with_resolution(document, ResolutionConfig::default())
    }

    pub fn with_resolution(document: ApiDocument, resolution: ResolutionConfig) -> Self {
        Self {
            document,
            resolution,
        }
    }

    /// Parse an OpenAPI spec from YAML or JSON text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(Self::new(ApiDocument::from_yaml_str(content)?))
    }

    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    /// List every operation: paths in document order, then methods in
    /// [`HttpMethod::ALL`] order.
    ///
    /// Fails with [`ToolSpecError::MissingServer`] before walking anything if
    /// the document declares no server. [`ApiDocument`] already refuses such
    /// documents at load time, so this only guards hand-built values.
    pub fn interfaces(&self) -> Result<Vec<Interface<'_>>> {
        if self.document.first_server().is_none() {
            return Err(ToolSpecError::MissingServer);
        }

        let interfaces = self
            .document
            .paths
            .iter()
            .flat_map(|(path, item)| {
                item.operations.iter().map(move |(method, operation)| Interface {
                    path,
                    method: *method,
                    operation,
                })
            })
            .collect();

        Ok(interfaces)
    }

    /// Convert every operation into a tool bundle.
    ///
    /// Any error aborts the whole document; there is no partial result.
    pub fn parse(&self) -> Result<ParseOutcome> {
        let span = toolspec_telemetry::document_parse_span(self.document.paths.len());
        let _guard = span.enter();

        let interfaces = self.interfaces()?;
        let server_url = self
            .document
            .first_server()
            .map(|server| server.url.as_str())
            .ok_or(ToolSpecError::MissingServer)?;

        debug!("Base URL: {}", server_url);

        let resolver = ReferenceResolver::new(&self.document, self.resolution.reference_mode);
        let extractor = ParameterExtractor::new(self.resolution.content_type_policy);
        let mut warnings = Warnings::default();

        let bundles = interfaces
            .iter()
            .map(|interface| {
                build_bundle(server_url, interface, &resolver, &extractor, &mut warnings)
            })
            .collect::<Result<Vec<_>>>()?;

        toolspec_telemetry::record_parse_result(&span, bundles.len(), warnings.len());
        info!("Parsed {} tool bundles from OpenAPI spec", bundles.len());

        Ok(ParseOutcome { bundles, warnings })
    }
}

fn build_bundle(
    server_url: &str,
    interface: &Interface<'_>,
    resolver: &ReferenceResolver<'_>,
    extractor: &ParameterExtractor,
    warnings: &mut Warnings,
) -> Result<ToolBundle> {
    let operation = interface.operation;
    debug!("Building bundle for {} {}", interface.method, interface.path);

    let explicit = operation
        .parameters
        .iter()
        .map(|entry| resolver.resolve_parameter(entry))
        .collect::<Result<Vec<_>>>()?;

    let mut raw_operation = operation.raw.clone();
    let body = resolver.resolve_request_body(operation, &mut raw_operation)?;
    let parameters = extractor.extract(&explicit, &body);

    let operation_id = operation
        .operation_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ToolSpecError::schema_violation(format!(
                "operation {} {} has no 'operationId'",
                interface.method, interface.path
            ))
        })?;

    detect_duplicates(&operation_id, &parameters, warnings);

    Ok(ToolBundle {
        server_url: format!("{}{}", server_url, interface.path),
        method: interface.method,
        summary: operation.summary.clone(),
        operation_id,
        parameters,
        author: String::new(),
        icon: None,
        raw_operation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReferenceMode;
    use crate::outcome::DUPLICATED_PARAMETER;
    use serde_json::json;

    const TEST_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
servers:
  - url: https://api.example.com
paths:
  /users:
    post:
      operationId: createUser
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/NewUser'
    get:
      operationId: listUsers
      summary: List all users
  /users/{id}:
    delete:
      operationId: deleteUser
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
    get:
      operationId: getUser
      summary: Get user by ID
      parameters:
        - name: id
          in: path
          description: User id
          required: true
          schema:
            type: integer
components:
  schemas:
    NewUser:
      required: [email]
      properties:
        email:
          type: string
          description: Contact address
        nickname:
          type: string
"#;

    #[test]
    fn test_interfaces_follow_fixed_method_order() {
        let parser = OpenApiParser::from_yaml_str(TEST_SPEC).unwrap();
        let interfaces = parser.interfaces().unwrap();

        let order: Vec<(&str, HttpMethod)> =
            interfaces.iter().map(|i| (i.path, i.method)).collect();
        assert_eq!(
            order,
            [
                ("/users", HttpMethod::Get),
                ("/users", HttpMethod::Post),
                ("/users/{id}", HttpMethod::Get),
                ("/users/{id}", HttpMethod::Delete),
            ]
        );
    }

    #[test]
    fn test_parse_builds_bundles() {
        let outcome = OpenApiParser::from_yaml_str(TEST_SPEC).unwrap().parse().unwrap();
        assert_eq!(
            outcome.operation_ids(),
            ["listUsers", "createUser", "getUser", "deleteUser"]
        );
        assert!(outcome.warnings.is_empty());

        let get_user = outcome.get("getUser").unwrap();
        assert_eq!(get_user.server_url, "https://api.example.com/users/{id}");
        assert_eq!(get_user.method, HttpMethod::Get);
        assert_eq!(get_user.summary.as_deref(), Some("Get user by ID"));
        assert_eq!(get_user.author, "");
        assert!(get_user.icon.is_none());
        assert_eq!(get_user.parameters.len(), 1);
        assert_eq!(get_user.parameters[0].llm_description, "User id");

        let create = outcome.get("createUser").unwrap();
        assert!(create.summary.is_none());
        let names: Vec<&str> = create.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["email", "nickname"]);
        assert!(create.parameters[0].required);
        assert!(!create.parameters[1].required);
        assert_eq!(
            create.raw_operation["requestBody"]["content"]["application/json"]["schema"]["required"],
            json!(["email"])
        );
    }

    #[test]
    fn test_empty_servers_fails_before_walking() {
        let result = OpenApiParser::from_yaml_str("servers: []\npaths:\n  /a:\n    get: {}\n");
        assert!(matches!(result, Err(ToolSpecError::MissingServer)));
    }

    #[test]
    fn test_missing_operation_id_is_fatal() {
        let parser = OpenApiParser::from_yaml_str(
            "servers:\n  - url: https://x\npaths:\n  /a:\n    get:\n      summary: no id\n",
        )
        .unwrap();
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ToolSpecError::SchemaViolation(_)));
        assert!(err.to_string().contains("GET /a"));
    }

    #[test]
    fn test_duplicate_across_parameters_and_body() {
        let doc = ApiDocument::from_value(json!({
            "servers": [{"url": "https://x"}],
            "paths": {"/items/{id}": {"put": {
                "operationId": "updateItem",
                "parameters": [{"name": "id", "in": "path", "required": true}],
                "requestBody": {"content": {"application/json": {"schema": {
                    "properties": {"id": {"type": "string"}, "title": {}}
                }}}}
            }}}
        }))
        .unwrap();

        let outcome = OpenApiParser::new(doc).parse().unwrap();
        let bundle = &outcome.bundles[0];
        assert_eq!(bundle.parameters.len(), 3);
        assert_eq!(
            outcome.warnings.get(DUPLICATED_PARAMETER),
            Some("Parameter id is duplicated.")
        );
    }

    #[test]
    fn test_unresolvable_reference_aborts_document() {
        let doc = ApiDocument::from_value(json!({
            "servers": [{"url": "https://x"}],
            "paths": {
                "/ok": {"get": {"operationId": "ok"}},
                "/broken": {"post": {
                    "operationId": "broken",
                    "requestBody": {"content": {"application/json": {
                        "schema": {"$ref": "#/components/schemas/Nope"}
                    }}}
                }}
            }
        }))
        .unwrap();

        let err = OpenApiParser::new(doc).parse().unwrap_err();
        assert!(matches!(err, ToolSpecError::Lookup { .. }));
    }

    #[test]
    fn test_recursive_mode_resolves_chain() {
        let doc = ApiDocument::from_value(json!({
            "servers": [{"url": "https://x"}],
            "paths": {"/a": {"post": {
                "operationId": "a",
                "requestBody": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/Alias"}
                }}}
            }}},
            "components": {"schemas": {
                "Alias": {"$ref": "#/components/schemas/Real"},
                "Real": {"properties": {"field": {"description": "d"}}}
            }}
        }))
        .unwrap();

        let single = OpenApiParser::new(doc.clone()).parse().unwrap();
        assert!(single.bundles[0].parameters.is_empty());

        let recursive = OpenApiParser::with_resolution(
            doc,
            ResolutionConfig {
                reference_mode: ReferenceMode::Recursive,
                ..Default::default()
            },
        )
        .parse()
        .unwrap();
        assert_eq!(recursive.bundles[0].parameters[0].name, "field");
    }

    #[test]
    fn test_server_url_is_plain_concatenation() {
        let doc = ApiDocument::from_value(json!({
            "servers": [{"url": "https://x/api/"}, {"url": "https://ignored"}],
            "paths": {"/v1/ping": {"head": {"operationId": "ping"}}}
        }))
        .unwrap();
        let outcome = OpenApiParser::new(doc).parse().unwrap();
        assert_eq!(outcome.bundles[0].server_url, "https://x/api//v1/ping");
        assert_eq!(outcome.bundles[0].method, HttpMethod::Head);
    }
}
