//! Document loading: YAML text and OpenAI plugin manifests.
//!
//! This is the only place that performs I/O. A manifest is checked fully
//! before any request is sent, then its document is fetched with a single GET.

use crate::config::FetchConfig;
use crate::document::ApiDocument;
use crate::error::{Result, ToolSpecError};
use serde::Deserialize;
use tracing::{debug, info, Instrument};

/// API type accepted in a plugin manifest.
pub const OPENAPI_API_TYPE: &str = "openapi";

/// The parts of an OpenAI plugin manifest this crate reads.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PluginManifest {
    pub api: ManifestApi,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManifestApi {
    #[serde(rename = "type")]
    pub api_type: String,
    pub url: String,
}

impl PluginManifest {
    /// Decode a manifest, failing with [`ToolSpecError::Manifest`] on bad
    /// JSON or a missing `api.url` / `api.type`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ToolSpecError::Manifest(e.to_string()))
    }

    /// Reject anything but OpenAPI manifests.
    pub fn openapi_url(&self) -> Result<&str> {
        if self.api.api_type != OPENAPI_API_TYPE {
            return Err(ToolSpecError::UnsupportedApiType(self.api.api_type.clone()));
        }
        Ok(&self.api.url)
    }
}

/// Loads API documents from text or from the URL a manifest names.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    client: reqwest::Client,
}

impl DocumentLoader {
    /// Build a loader whose HTTP client sends `config.user_agent` and gives
    /// up after `config.timeout_secs`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }

    /// Decode YAML text into a document.
    pub fn load_yaml(&self, yaml: &str) -> Result<ApiDocument> {
        ApiDocument::from_yaml_str(yaml)
    }

    /// Decode a plugin manifest, fetch the document it points at and load it.
    pub async fn load_manifest(&self, json: &str) -> Result<ApiDocument> {
        let manifest = PluginManifest::from_json(json)?;
        let url = manifest.openapi_url()?;
        let body = self.fetch(url).await?;
        self.load_yaml(&body)
    }

    /// GET `url` once. Anything but HTTP 200 is a [`ToolSpecError::Fetch`];
    /// there is no retry.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let span = toolspec_telemetry::manifest_fetch_span(url);
        self.fetch_once(url).instrument(span).await
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        info!("Fetching OpenAPI document from URL: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        toolspec_telemetry::record_fetch_status(&tracing::Span::current(), status.as_u16());

        if status != reqwest::StatusCode::OK {
            return Err(ToolSpecError::Fetch(format!("{} returned HTTP {}", url, status)));
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
