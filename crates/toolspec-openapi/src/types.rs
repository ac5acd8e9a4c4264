//! Output data structures: tool bundles and their parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method of an API operation.
///
/// The declaration order is the enumeration order used when walking a path
/// item, independent of the order methods appear in the source document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// All supported methods in enumeration order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// The lowercase key used for this method in an OpenAPI path item.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Text shown to humans, carried in every supported locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct I18nText {
    #[serde(rename = "en_US")]
    pub en_us: String,
    #[serde(rename = "zh_Hans")]
    pub zh_hans: String,
}

impl I18nText {
    /// Use the same text for every locale.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en_us: text.clone(),
            zh_hans: text,
        }
    }
}

/// Type of a tool parameter as presented to the model.
///
/// Every imported parameter is a string regardless of the type declared in
/// the API document: the model generates arguments as text and the request
/// builder converts them later.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    #[default]
    String,
}

/// Who supplies a parameter's value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterForm {
    /// Generated by the language model at call time
    #[default]
    Llm,
    /// Fixed by the operator when the tool is configured
    Form,
}

/// One argument of a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: String,
    pub label: I18nText,
    pub human_description: I18nText,
    pub llm_description: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub required: bool,
    pub form: ParameterForm,
    pub default: Option<String>,
}

impl ToolParameter {
    /// Build an LLM-supplied string parameter.
    pub fn llm_string(
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        default: Option<String>,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        Self {
            label: I18nText::uniform(name.clone()),
            human_description: I18nText::uniform(description.clone()),
            llm_description: description,
            name,
            parameter_type: ParameterType::String,
            required,
            form: ParameterForm::Llm,
            default,
        }
    }
}

/// Normalized description of one callable API operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolBundle {
    /// First server URL followed by the operation path, concatenated verbatim
    pub server_url: String,
    pub method: HttpMethod,
    pub summary: Option<String>,
    pub operation_id: String,
    pub parameters: Vec<ToolParameter>,
    /// Placeholder for later curation
    pub author: String,
    pub icon: Option<String>,
    /// Operation node as found in the document, with request body
    /// references replaced by their targets
    #[serde(rename = "openapi")]
    pub raw_operation: Value,
}

impl ToolBundle {
    /// Look up a parameter by name. With repeated names the last one wins.
    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().rev().find(|p| p.name == name)
    }
}
