//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use content_client::{ContentClient, MemoryContentClient, SanityClient};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Document export to query instead of the API.
    pub fixture: Option<PathBuf>,
}

impl Context {
    /// Load context from the config file and the environment.
    pub fn load(config_path: Option<&str>, fixture: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        config
            .content
            .apply_process_env()
            .context("Invalid CONTENT_* environment variable")?;

        let fixture = fixture
            .or_else(|| config.storefront.fixture.clone())
            .map(|path| resolve(&cwd, &path));

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            fixture,
        })
    }

    /// Build the client commands query through: the fixture store when one
    /// is set, otherwise the HTTP API.
    pub fn client(&self) -> Result<Box<dyn ContentClient>> {
        if let Some(path) = &self.fixture {
            self.output
                .debug(&format!("Reading documents from {}", path.display()));
            let store = load_fixture(path)?.with_perspective(self.config.content.perspective);
            return Ok(Box::new(store));
        }

        if self.config.content.project_id.is_empty() {
            bail!(
                "No project configured. Run `content config init`, set CONTENT_PROJECT_ID, or pass --fixture."
            );
        }

        self.output.debug(&format!(
            "Querying {}",
            self.config.content.query_endpoint()
        ));
        let client = SanityClient::new(self.config.content.clone())
            .context("Failed to create content client")?;
        Ok(Box::new(client))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

/// Find a config file in `start` or one of its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Load a document export: a JSON array, or one document per line.
pub fn load_fixture(path: &Path) -> Result<MemoryContentClient> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture: {}", path.display()))?;

    let store = if text.trim_start().starts_with('[') {
        MemoryContentClient::from_json(&text)
    } else {
        MemoryContentClient::from_ndjson(&text)
    };
    store.with_context(|| format!("Failed to load fixture: {}", path.display()))
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
