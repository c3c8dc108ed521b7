//! Schema commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use content_schema::{storefront_schema, SchemaSet};
use serde::Serialize;
use serde_json::Value;

use super::{SchemaArgs, SchemaCommand};
use crate::context::Context;

/// Run the schema command.
pub async fn run(args: SchemaArgs, ctx: &Context) -> Result<()> {
    let schema = storefront_schema().context("Storefront schema is inconsistent")?;

    match args.command {
        SchemaCommand::List => list_types(&schema, ctx),
        SchemaCommand::Export { output } => export_schema(&schema, output.as_deref(), ctx),
        SchemaCommand::Validate { file, type_name } => {
            let path = ctx.resolve_path(&file);
            validate_file(&schema, &path, type_name.as_deref(), ctx)
        }
    }
}

fn list_types(schema: &SchemaSet, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let types: Vec<Value> = schema
            .types()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "kind": t.kind.as_str(),
                    "fields": t.fields.len(),
                })
            })
            .collect();
        ctx.output.json(&types);
        return Ok(());
    }

    ctx.output.header("Schema types");
    let widths = [16, 10, 20, 6];
    ctx.output.table_row(&["NAME", "KIND", "TITLE", "FIELDS"], &widths);
    for t in schema.types() {
        let fields = t.fields.len().to_string();
        ctx.output
            .table_row(&[&t.name, t.kind.as_str(), &t.title, &fields], &widths);
    }
    Ok(())
}

fn export_schema(schema: &SchemaSet, output: Option<&str>, ctx: &Context) -> Result<()> {
    let json = serde_json::to_string_pretty(&schema.to_studio_json())?;
    match output {
        Some(path) => {
            let path = ctx.resolve_path(path);
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Exported schema to {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Validation outcome for one document.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub index: usize,
    pub id: Option<String>,
    pub issues: Vec<String>,
}

fn validate_file(
    schema: &SchemaSet,
    path: &Path,
    type_name: Option<&str>,
    ctx: &Context,
) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let documents = parse_documents(&text)?;
    let reports = validate_documents(schema, &documents, type_name)?;
    let failed: Vec<&DocumentReport> = reports.iter().filter(|r| !r.issues.is_empty()).collect();

    if ctx.output.is_json() {
        ctx.output.json(&reports);
    } else {
        ctx.output
            .header(&format!("Validating {} document(s)", documents.len()));
        for report in &failed {
            let label = report
                .id
                .clone()
                .unwrap_or_else(|| format!("#{}", report.index));
            ctx.output.warn(&label);
            for issue in &report.issues {
                ctx.output.list_item(issue);
            }
        }
    }

    if !failed.is_empty() {
        bail!("{} of {} document(s) failed validation", failed.len(), reports.len());
    }
    ctx.output.success("All documents are valid");
    Ok(())
}

/// Parse a JSON array, a single JSON document, or NDJSON.
pub fn parse_documents(text: &str) -> Result<Vec<Value>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(text).context("Invalid JSON array");
    }
    if let Ok(single) = serde_json::from_str::<Value>(text) {
        return Ok(vec![single]);
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid JSON on line {}", i + 1))
        })
        .collect()
}

/// Validate each document by its `_type`, or as `type_name` when given.
pub fn validate_documents(
    schema: &SchemaSet,
    documents: &[Value],
    type_name: Option<&str>,
) -> Result<Vec<DocumentReport>> {
    documents
        .iter()
        .enumerate()
        .map(|(index, doc)| {
            let issues = match type_name {
                Some(name) => schema.validate_value(name, doc)?,
                None => schema.validate_document(doc)?,
            };
            Ok(DocumentReport {
                index,
                id: doc.get("_id").and_then(Value::as_str).map(str::to_string),
                issues: issues.iter().map(ToString::to_string).collect(),
            })
        })
        .collect()
}
