//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::ContentError;

/// Prefix for environment variable overrides (`CONTENT_PROJECT_ID`, ...).
pub const ENV_PREFIX: &str = "CONTENT_";

/// Which document versions queries see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Perspective {
    /// Published documents only.
    #[default]
    Published,
    /// Drafts overlaid on published documents (requires a token).
    PreviewDrafts,
    /// Drafts and published documents side by side.
    Raw,
}

impl Perspective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Published => "published",
            Perspective::PreviewDrafts => "previewDrafts",
            Perspective::Raw => "raw",
        }
    }

    /// Parse the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "published" => Some(Perspective::Published),
            "previewDrafts" | "drafts" => Some(Perspective::PreviewDrafts),
            "raw" => Some(Perspective::Raw),
            _ => None,
        }
    }
}

/// Connection settings for a content repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Project identifier (lowercase letters, digits and dashes).
    pub project_id: String,

    /// Dataset name.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Dated API version (`YYYY-MM-DD`).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Read through the edge cache. Ignored when a token is set.
    #[serde(default = "default_true")]
    pub use_cdn: bool,

    /// Read token for private datasets and drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Document perspective.
    #[serde(default)]
    pub perspective: Perspective,

    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Override the API origin (e.g. a local proxy). Must include the scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ContentConfig {
    /// Create a configuration for a project with default settings.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: true,
            token: None,
            perspective: Perspective::default(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            api_host: None,
        }
    }

    /// Set the dataset.
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the read token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Enable or disable the CDN.
    pub fn with_cdn(mut self, enabled: bool) -> Self {
        self.use_cdn = enabled;
        self
    }

    /// Set the perspective.
    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    /// Point the client at a different API origin.
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Apply `CONTENT_*` overrides from a variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ContentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("PROJECT_ID") {
            self.project_id = v;
        }
        if let Some(v) = var("DATASET") {
            self.dataset = v;
        }
        if let Some(v) = var("API_VERSION") {
            self.api_version = v;
        }
        if let Some(v) = var("TOKEN") {
            self.token = (!v.is_empty()).then_some(v);
        }
        if let Some(v) = var("USE_CDN") {
            self.use_cdn = parse_bool(&v)
                .ok_or_else(|| ContentError::Config(format!("CONTENT_USE_CDN: not a boolean: {}", v)))?;
        }
        if let Some(v) = var("PERSPECTIVE") {
            self.perspective = Perspective::parse(&v)
                .ok_or_else(|| ContentError::Config(format!("CONTENT_PERSPECTIVE: unknown value: {}", v)))?;
        }
        if let Some(v) = var("API_HOST") {
            self.api_host = Some(v);
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ContentError> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Whether queries go through the CDN host.
    pub fn uses_cdn(&self) -> bool {
        self.use_cdn && self.token.is_none() && self.perspective == Perspective::Published
    }

    /// Query endpoint URL (without query string).
    pub fn query_endpoint(&self) -> String {
        let origin = match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let host = if self.uses_cdn() { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.project_id, host)
            }
        };
        format!(
            "{}/v{}/data/query/{}",
            origin, self.api_version, self.dataset
        )
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.project_id.is_empty() {
            return Err(ContentError::Config("project_id is required".to_string()));
        }
        if !self
            .project_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ContentError::Config(format!(
                "project_id may only contain a-z, 0-9 and '-': {}",
                self.project_id
            )));
        }

        let dataset_ok = !self.dataset.is_empty()
            && self.dataset.len() <= 64
            && self
                .dataset
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric())
            && self
                .dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !dataset_ok {
            return Err(ContentError::Config(format!(
                "invalid dataset name: {}",
                self.dataset
            )));
        }

        if self.api_version != "1"
            && chrono::NaiveDate::parse_from_str(&self.api_version, "%Y-%m-%d").is_err()
        {
            return Err(ContentError::Config(format!(
                "api_version must be YYYY-MM-DD: {}",
                self.api_version
            )));
        }

        if self.perspective == Perspective::PreviewDrafts && self.token.is_none() {
            return Err(ContentError::Config(
                "previewDrafts perspective requires a token".to_string(),
            ));
        }

        if let Some(host) = &self.api_host {
            if !(host.starts_with("http://") || host.starts_with("https://")) {
                return Err(ContentError::Config(format!(
                    "api_host must include http:// or https://: {}",
                    host
                )));
            }
        }

        if self.timeout_ms == 0 {
            return Err(ContentError::Config("timeout_ms must be positive".to_string()));
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ContentConfig::new("abc123");
        assert_eq!(config.dataset, "production");
        assert_eq!(config.api_version, "2024-01-01");
        assert!(config.use_cdn);
        assert_eq!(config.perspective, Perspective::Published);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_minimal_toml_shape() {
        let config: ContentConfig =
            serde_json::from_str(r#"{ "project_id": "abc123", "perspective": "raw" }"#).unwrap();
        assert_eq!(config.dataset, "production");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.perspective, Perspective::Raw);
    }

    #[test]
    fn test_endpoint_uses_cdn_without_token() {
        let config = ContentConfig::new("abc123");
        assert_eq!(
            config.query_endpoint(),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn test_endpoint_skips_cdn_with_token() {
        let config = ContentConfig::new("abc123").with_token("sk");
        assert!(!config.uses_cdn());
        assert_eq!(
            config.query_endpoint(),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn test_endpoint_with_api_host() {
        let config = ContentConfig::new("abc123")
            .with_dataset("staging")
            .with_api_host("http://localhost:3333/");
        assert_eq!(
            config.query_endpoint(),
            "http://localhost:3333/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ContentConfig::new("abc123");
        config
            .apply_env(env(&[
                ("CONTENT_DATASET", "staging"),
                ("CONTENT_TOKEN", "sk-live"),
                ("CONTENT_USE_CDN", "false"),
                ("CONTENT_PERSPECTIVE", "drafts"),
            ]))
            .unwrap();

        assert_eq!(config.project_id, "abc123");
        assert_eq!(config.dataset, "staging");
        assert_eq!(config.token.as_deref(), Some("sk-live"));
        assert!(!config.use_cdn);
        assert_eq!(config.perspective, Perspective::PreviewDrafts);
    }

    #[test]
    fn test_env_empty_token_clears() {
        let mut config = ContentConfig::new("abc123").with_token("old");
        config.apply_env(env(&[("CONTENT_TOKEN", "")])).unwrap();
        assert!(config.token.is_none());
    }

    #[test]
    fn test_env_bad_bool() {
        let mut config = ContentConfig::new("abc123");
        let err = config
            .apply_env(env(&[("CONTENT_USE_CDN", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ContentError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ContentConfig::new("").validate().is_err());
        assert!(ContentConfig::new("ABC").validate().is_err());
        assert!(ContentConfig::new("abc").with_dataset("").validate().is_err());
        assert!(ContentConfig::new("abc").with_dataset("-bad").validate().is_err());
        assert!(ContentConfig::new("abc").with_api_version("2024-13-01").validate().is_err());
        assert!(ContentConfig::new("abc")
            .with_perspective(Perspective::PreviewDrafts)
            .validate()
            .is_err());
        assert!(ContentConfig::new("abc").with_api_host("localhost").validate().is_err());
    }

    #[test]
    fn test_validate_accepts_legacy_version() {
        assert!(ContentConfig::new("abc").with_api_version("1").validate().is_ok());
    }
}
