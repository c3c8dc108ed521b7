//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use content_client::ContentConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_FILE_NAMES: &[&str] = &["content.toml", ".content.toml", "content.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Content repository connection.
    #[serde(default)]
    pub content: ContentConfig,

    /// Storefront rendering and local data.
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

/// Storefront settings used by `render` and the listing commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Symbol prefixed to prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Default document export for offline use (JSON array or NDJSON).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            fixture: None,
        }
    }
}

/// A `config get`/`config set` key that does not exist or cannot be set.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigKeyError {
    #[error("Unknown config key: {0}")]
    Unknown(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Look up a dotted key as a display string.
    pub fn get(&self, key: &str) -> Result<String, ConfigKeyError> {
        let c = &self.content;
        let value = match key {
            "content.project_id" => c.project_id.clone(),
            "content.dataset" => c.dataset.clone(),
            "content.api_version" => c.api_version.clone(),
            "content.use_cdn" => c.use_cdn.to_string(),
            "content.token" => match &c.token {
                Some(_) => "<set>".to_string(),
                None => "<unset>".to_string(),
            },
            "content.perspective" => c.perspective.as_str().to_string(),
            "content.timeout_ms" => c.timeout_ms.to_string(),
            "content.max_retries" => c.max_retries.to_string(),
            "content.api_host" => c.api_host.clone().unwrap_or_default(),
            "storefront.currency_symbol" => self.storefront.currency_symbol.clone(),
            "storefront.fixture" => self.storefront.fixture.clone().unwrap_or_default(),
            _ => return Err(ConfigKeyError::Unknown(key.to_string())),
        };
        Ok(value)
    }

    /// Set a dotted key from its string form. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigKeyError> {
        let invalid = || ConfigKeyError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        let c = &mut self.content;

        match key {
            "content.project_id" => c.project_id = value.to_string(),
            "content.dataset" => c.dataset = value.to_string(),
            "content.api_version" => c.api_version = value.to_string(),
            "content.use_cdn" => c.use_cdn = value.parse().map_err(|_| invalid())?,
            "content.token" => c.token = optional(value),
            "content.perspective" => {
                c.perspective =
                    content_client::Perspective::parse(value).ok_or_else(invalid)?
            }
            "content.timeout_ms" => c.timeout_ms = value.parse().map_err(|_| invalid())?,
            "content.max_retries" => c.max_retries = value.parse().map_err(|_| invalid())?,
            "content.api_host" => c.api_host = optional(value),
            "storefront.currency_symbol" => self.storefront.currency_symbol = value.to_string(),
            "storefront.fixture" => self.storefront.fixture = optional(value),
            _ => return Err(ConfigKeyError::Unknown(key.to_string())),
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default content.toml config file.
pub fn generate_default_config(project_id: &str) -> String {
    format!(
        r#"# Storefront content configuration

[content]
project_id = "{project_id}"
dataset = "production"
api_version = "2024-01-01"
use_cdn = true
perspective = "published"
timeout_ms = 10000
max_retries = 2
# The read token is best kept in CONTENT_TOKEN (or .env) rather than here.

[storefront]
currency_symbol = "$"
# fixture = "content-export.ndjson"
"#,
        project_id = project_id
    )
}
