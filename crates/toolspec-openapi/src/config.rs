//! Parser configuration
//!
//! Loads configuration with priority:
//! 1. Environment overrides (`TOOLSPEC_FETCH_TIMEOUT_SECS`)
//! 2. The TOML file passed to [`ParserConfig::load_from`]
//! 3. Defaults

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `fetch.timeout_secs`.
pub const TIMEOUT_ENV_VAR: &str = "TOOLSPEC_FETCH_TIMEOUT_SECS";

/// Parser configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,
}

/// Settings for retrieving the document a plugin manifest points at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
    /// User-Agent header sent with the fetch (can reference env var with ${VAR_NAME})
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout; there is no retry
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// How request body schemas are resolved and selected
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionConfig {
    #[serde(default)]
    pub reference_mode: ReferenceMode,

    #[serde(default)]
    pub content_type_policy: ContentTypePolicy,
}

/// How far `$ref` pointers are followed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMode {
    /// Replace a reference with its target and stop there, even if the
    /// target is itself a reference
    #[default]
    SingleLevel,
    /// Follow chained references until an inline node; cycles are errors
    Recursive,
}

/// Which media type's schema supplies body parameters when a request body
/// declares several.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypePolicy {
    /// The last declared media type
    #[default]
    LastWins,
    /// `application/json` when declared, otherwise the last media type
    PreferJson,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ParserConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading parser configuration from: {:?}", path);

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: ParserConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.resolve_env_vars()?;
        ensure!(
            config.fetch.timeout_secs > 0,
            "fetch.timeout_secs must be at least 1 second in {:?}",
            path
        );

        Ok(config)
    }

    fn resolve_env_vars(&mut self) -> Result<()> {
        if let Some(resolved) = Self::resolve_env_var(&self.fetch.user_agent) {
            self.fetch.user_agent = resolved;
        }

        if let Ok(raw) = env::var(TIMEOUT_ENV_VAR) {
            let timeout_secs: u64 = raw.trim().parse().with_context(|| {
                format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_ENV_VAR, raw
                )
            })?;
            ensure!(timeout_secs > 0, "{} must be at least 1 second", TIMEOUT_ENV_VAR);
            self.fetch.timeout_secs = timeout_secs;
        }

        Ok(())
    }

    /// Resolve a single ${VAR_NAME} reference
    fn resolve_env_var(value: &str) -> Option<String> {
        let name = value.strip_prefix("${")?.strip_suffix('}')?;
        env::var(name).ok()
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
