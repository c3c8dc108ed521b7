//! Ad-hoc queries.

use anyhow::{bail, Context as _, Result};
use content_groq::{Direction, FieldPath, GroqQuery, Slice};
use serde_json::Value;

use super::QueryArgs;
use crate::context::Context;

/// Run the query command.
pub async fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args)?;
    ctx.output.debug(&format!("GROQ: {}", query.to_groq()));

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Running query...");
    let result = client.fetch_value(&query).await;
    spinner.finish_and_clear();

    let value = result?;
    ctx.output.json(&value);

    if let Value::Array(items) = &value {
        tracing::debug!(results = items.len(), "query finished");
    }
    Ok(())
}

/// Turn the command line into a query.
pub fn build_query(args: &QueryArgs) -> Result<GroqQuery> {
    let mut query = match (&args.groq, &args.doc_type) {
        (Some(text), _) => GroqQuery::raw(text.trim()),
        (None, Some(doc_type)) => {
            let mut query = GroqQuery::of_type(doc_type);
            if let Some(order) = &args.order {
                let (field, direction) = parse_order(order)?;
                query = query.order_by(field, direction);
            }
            if let Some(limit) = args.limit {
                query = query.slice(Slice::take(limit));
            }
            query
        }
        (None, None) => bail!("Pass GROQ text or --type"),
    };

    for param in &args.params {
        let (name, value) = parse_param(param)?;
        query = query
            .param(name, value)
            .with_context(|| format!("Invalid parameter: {}", param))?;
    }

    Ok(query)
}

/// Parse `name=value`. The value is read as JSON when it parses, otherwise
/// it is taken as a plain string.
pub fn parse_param(input: &str) -> Result<(&str, Value)> {
    let Some((name, raw)) = input.split_once('=') else {
        bail!("Parameter must look like name=value: {}", input);
    };
    let name = name.trim().trim_start_matches('$');
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name, value))
}

/// Parse `field` or `field:asc|desc`.
pub fn parse_order(input: &str) -> Result<(FieldPath, Direction)> {
    let (field, direction) = match input.rsplit_once(':') {
        Some((field, "asc")) => (field, Direction::Asc),
        Some((field, "desc")) => (field, Direction::Desc),
        Some((_, other)) => bail!("Unknown sort direction: {}", other),
        None => (input, Direction::Asc),
    };
    let path = FieldPath::parse(field).with_context(|| format!("Invalid sort field: {}", field))?;
    Ok((path, direction))
}
