//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use dialoguer::Input;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { project_id, force } => init_config(project_id, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut shown = ctx.config.clone();
    if shown.content.token.is_some() {
        shown.content.token = Some("<set>".to_string());
    }

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let c = &shown.content;
    ctx.output.info("");
    ctx.output.info("[content]");
    ctx.output.kv("project_id", &c.project_id);
    ctx.output.kv("dataset", &c.dataset);
    ctx.output.kv("api_version", &c.api_version);
    ctx.output.kv("use_cdn", &c.use_cdn.to_string());
    ctx.output.kv("token", c.token.as_deref().unwrap_or("<unset>"));
    ctx.output.kv("perspective", c.perspective.as_str());
    ctx.output.kv("timeout_ms", &c.timeout_ms.to_string());
    ctx.output.kv("max_retries", &c.max_retries.to_string());
    if let Some(host) = &c.api_host {
        ctx.output.kv("api_host", host);
    }
    if !c.project_id.is_empty() {
        ctx.output.kv("endpoint", &c.query_endpoint());
    }

    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output
        .kv("currency_symbol", &shown.storefront.currency_symbol);
    if let Some(fixture) = &ctx.fixture {
        ctx.output.kv("fixture", &fixture.display().to_string());
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = writable_config_path(ctx) else {
        bail!("No config file found. Run `content config init` to create one.");
    };

    // Environment overrides stay out of the file.
    let mut config = CliConfig::load(&path)?;
    config.set(key, value)?;
    config.save(&path)?;

    let shown = if key == "content.token" { "<set>" } else { value };
    ctx.output.success(&format!("Set {} = {}", key, shown));
    Ok(())
}

fn writable_config_path(ctx: &Context) -> Option<PathBuf> {
    ctx.config_path
        .clone()
        .or_else(|| find_config_file(&ctx.cwd))
}

fn init_config(project_id: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let project_id = match project_id {
        Some(id) => id,
        None if ctx.output.is_json() => bail!("--project-id is required with --json"),
        None => Input::<String>::new()
            .with_prompt("Project id")
            .interact_text()?,
    };

    let content = generate_default_config(project_id.trim());
    let config: CliConfig = toml::from_str(&content)?;
    config.content.validate()?;

    fs::write(&config_path, content)?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.fixture.is_none() {
        if let Err(e) = ctx.config.content.validate() {
            errors.push(e.to_string());
        }
    }

    if let Some(fixture) = &ctx.fixture {
        if !fixture.is_file() {
            errors.push(format!("fixture not found: {}", fixture.display()));
        }
    }

    if ctx.config.content.token.is_some() && ctx.config.content.use_cdn {
        warnings.push("content.use_cdn is ignored when a token is set".to_string());
    }

    if ctx.config.content.max_retries > 5 {
        warnings.push(format!(
            "content.max_retries = {} makes failing pages slow to report",
            ctx.config.content.max_retries
        ));
    }

    if ctx.config_path.is_none() {
        warnings.push("no config file found; using defaults and CONTENT_* variables".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}
