//! Tool parameter extraction.
//!
//! Explicit `parameters` come first, in declaration order, followed by the
//! properties of one request body schema. Every parameter is emitted as an
//! LLM-supplied string.

use crate::config::ContentTypePolicy;
use crate::document::{ObjectSchema, RawParameter, Schema};
use crate::resolver::ResolvedContent;
use crate::types::ToolParameter;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Builds the ordered parameter list of one operation.
pub struct ParameterExtractor {
    policy: ContentTypePolicy,
}

impl ParameterExtractor {
    pub fn new(policy: ContentTypePolicy) -> Self {
        Self { policy }
    }

    /// Concatenate explicit parameters and the winning body schema's
    /// properties. Names are not deduplicated.
    pub fn extract(&self, explicit: &[RawParameter], body: &[ResolvedContent]) -> Vec<ToolParameter> {
        let mut parameters: Vec<ToolParameter> = explicit.iter().map(explicit_parameter).collect();

        if let Some(Schema::Inline(schema)) = self.select_body_schema(body) {
            parameters.extend(body_parameters(schema));
        }

        parameters
    }

    /// Pick the media type whose schema supplies body parameters.
    pub fn select_body_schema<'b>(&self, body: &'b [ResolvedContent]) -> Option<&'b Schema> {
        let winner = match self.policy {
            ContentTypePolicy::LastWins => body.last(),
            ContentTypePolicy::PreferJson => body
                .iter()
                .find(|c| c.content_type == JSON_CONTENT_TYPE)
                .or_else(|| body.last()),
        }?;
        winner.schema.as_ref()
    }
}

fn explicit_parameter(param: &RawParameter) -> ToolParameter {
    ToolParameter::llm_string(
        param.name.clone(),
        param.description.clone(),
        param.required,
        param.default.clone(),
    )
}

fn body_parameters(schema: &ObjectSchema) -> impl Iterator<Item = ToolParameter> + '_ {
    schema.properties.iter().map(move |(name, property)| {
        ToolParameter::llm_string(
            name.clone(),
            property.description.clone().unwrap_or_default(),
            schema.is_required(name),
            property.default.clone(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParameterForm, ParameterType};
    use serde_json::json;

    fn content(content_type: &str, schema: serde_json::Value) -> ResolvedContent {
        ResolvedContent {
            content_type: content_type.to_string(),
            schema: Some(Schema::from_value(&schema)),
        }
    }

    fn raw(name: &str, description: &str, required: bool, default: Option<&str>) -> RawParameter {
        RawParameter {
            name: name.into(),
            description: description.into(),
            required,
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_explicit_fields_are_copied() {
        let extractor = ParameterExtractor::new(ContentTypePolicy::LastWins);
        let params = extractor.extract(&[raw("limit", "Max items", true, Some("20"))], &[]);

        assert_eq!(params.len(), 1);
        let p = &params[0];
        assert_eq!(p.name, "limit");
        assert_eq!(p.human_description.en_us, "Max items");
        assert_eq!(p.human_description.zh_hans, "Max items");
        assert!(p.required);
        assert_eq!(p.default.as_deref(), Some("20"));
        assert_eq!(p.parameter_type, ParameterType::String);
        assert_eq!(p.form, ParameterForm::Llm);
    }

    #[test]
    fn test_body_properties_follow_explicit_parameters() {
        let extractor = ParameterExtractor::new(ContentTypePolicy::LastWins);
        let body = [content(
            "application/json",
            json!({
                "required": ["title"],
                "properties": {
                    "title": {"type": "string", "description": "Title"},
                    "count": {"type": "integer", "default": 3}
                }
            }),
        )];
        let params = extractor.extract(&[raw("id", "", true, None)], &body);

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["id", "title", "count"]);
        assert!(params[1].required);
        assert!(!params[2].required);
        assert_eq!(params[2].default.as_deref(), Some("3"));
        assert_eq!(params[2].human_description.en_us, "");
    }

    #[test]
    fn test_last_content_type_wins_by_default() {
        let extractor = ParameterExtractor::new(ContentTypePolicy::LastWins);
        let body = [
            content("application/json", json!({"properties": {"from_json": {}}})),
            content("application/x-www-form-urlencoded", json!({"properties": {"from_form": {}}})),
        ];
        let params = extractor.extract(&[], &body);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "from_form");
    }

    #[test]
    fn test_prefer_json_policy() {
        let extractor = ParameterExtractor::new(ContentTypePolicy::PreferJson);
        let body = [
            content("application/json", json!({"properties": {"from_json": {}}})),
            content("application/x-www-form-urlencoded", json!({"properties": {"from_form": {}}})),
        ];
        let params = extractor.extract(&[], &body);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "from_json");
    }

    #[test]
    fn test_winner_without_schema_adds_nothing() {
        let extractor = ParameterExtractor::new(ContentTypePolicy::LastWins);
        let body = [
            content("application/json", json!({"properties": {"a": {}}})),
            ResolvedContent {
                content_type: "text/plain".into(),
                schema: None,
            },
        ];
        assert!(extractor.extract(&[], &body).is_empty());
    }

    #[test]
    fn test_unresolved_reference_adds_nothing() {
        let extractor = ParameterExtractor::new(ContentTypePolicy::LastWins);
        let body = [ResolvedContent {
            content_type: "application/json".into(),
            schema: Some(Schema::Reference("#/components/schemas/Foo".into())),
        }];
        assert!(extractor.extract(&[], &body).is_empty());
    }
}
