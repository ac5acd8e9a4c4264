//! Front door for turning API descriptions into tool bundles.

use crate::config::ParserConfig;
use crate::document::ApiDocument;
use crate::error::Result;
use crate::loader::DocumentLoader;
use crate::outcome::ParseOutcome;
use crate::parser::OpenApiParser;
use tracing::info;

/// Imports tool bundles from OpenAPI YAML or OpenAI plugin manifests.
///
/// # Example
///
/// ```no_run
/// use toolspec_openapi::{ParserConfig, ToolSpecImporter};
///
/// # async fn example() -> Result<(), toolspec_openapi::ToolSpecError> {
/// let importer = ToolSpecImporter::new(ParserConfig::default())?;
/// let manifest = r#"{"api": {"type": "openapi", "url": "https://example.com/openapi.yaml"}}"#;
///
/// let outcome = importer.parse_openai_plugin_json(manifest).await?;
/// for bundle in &outcome.bundles {
///     println!("{} {} -> {}", bundle.method, bundle.server_url, bundle.operation_id);
/// }
/// for (key, message) in outcome.warnings.iter() {
///     println!("warning {}: {}", key, message);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolSpecImporter {
    config: ParserConfig,
    loader: DocumentLoader,
}

impl ToolSpecImporter {
    pub fn new(config: ParserConfig) -> Result<Self> {
        let loader = DocumentLoader::new(&config.fetch)?;
        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Convert an already loaded document.
    pub fn parse_openapi_document(&self, document: ApiDocument) -> Result<ParseOutcome> {
        OpenApiParser::with_resolution(document, self.config.resolution.clone()).parse()
    }

    /// Convert OpenAPI YAML (or JSON) text.
    pub fn parse_openapi_yaml(&self, yaml: &str) -> Result<ParseOutcome> {
        let document = self.loader.load_yaml(yaml)?;
        self.parse_openapi_document(document)
    }

    /// Convert the OpenAPI document an OpenAI plugin manifest points at.
    ///
    /// The manifest is validated before any network access; the document is
    /// then fetched once with the configured timeout.
    pub async fn parse_openai_plugin_json(&self, json: &str) -> Result<ParseOutcome> {
        let document = self.loader.load_manifest(json).await?;
        let outcome = self.parse_openapi_document(document)?;
        info!("Imported {} tools from plugin manifest", outcome.len());
        Ok(outcome)
    }
}
