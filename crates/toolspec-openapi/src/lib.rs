//! # Toolspec OpenAPI importer
//!
//! Converts an OpenAPI document, or an OpenAI plugin manifest pointing at
//! one, into normalized tool bundles that a tool runtime can present to a
//! language model.
//!
//! ## Features
//!
//! - Load OpenAPI YAML/JSON text or fetch it through a plugin manifest
//! - One [`ToolBundle`] per path and method, in a stable order
//! - Local `$ref` resolution for request bodies and parameters
//! - Explicit and request-body parameters merged into one string-typed list
//! - Duplicate parameter names reported as warnings, never deduplicated
//!
//! ## Example
//!
//! ```
//! use toolspec_openapi::{ParserConfig, ToolSpecImporter, DUPLICATED_PARAMETER};
//!
//! let spec = r#"
//! servers:
//!   - url: https://api.example.com
//! paths:
//!   /items/{id}:
//!     put:
//!       operationId: updateItem
//!       parameters:
//!         - name: id
//!           in: path
//!           required: true
//!       requestBody:
//!         content:
//!           application/json:
//!             schema:
//!               properties:
//!                 id: {type: string}
//! "#;
//!
//! let importer = ToolSpecImporter::new(ParserConfig::default())?;
//! let outcome = importer.parse_openapi_yaml(spec)?;
//!
//! assert_eq!(outcome.bundles[0].server_url, "https://api.example.com/items/{id}");
//! assert_eq!(outcome.bundles[0].parameters.len(), 2);
//! assert!(outcome.warnings.get(DUPLICATED_PARAMETER).is_some());
//! # Ok::<(), toolspec_openapi::ToolSpecError>(())
//! ```

mod config;
mod detector;
mod document;
mod error;
mod extractor;
mod importer;
mod loader;
mod outcome;
mod parser;
mod resolver;
mod types;

pub use config::{
    ContentTypePolicy, FetchConfig, ParserConfig, ReferenceMode, ResolutionConfig, TIMEOUT_ENV_VAR,
};
pub use detector::detect_duplicates;
pub use document::{
    ApiDocument, ObjectSchema, Operation, ParameterEntry, PathItem, PropertySchema, RawParameter,
    Schema, Server,
};
pub use error::{ErrorKind, Result, ToolSpecError};
pub use extractor::ParameterExtractor;
pub use importer::ToolSpecImporter;
pub use loader::{DocumentLoader, ManifestApi, OPENAPI_API_TYPE, PluginManifest};
pub use outcome::{DUPLICATED_PARAMETER, ParseOutcome, Warnings};
pub use parser::{Interface, OpenApiParser};
pub use resolver::{ReferenceResolver, ResolvedContent};
pub use types::{
    HttpMethod, I18nText, ParameterForm, ParameterType, ToolBundle, ToolParameter,
};
