//! Content CLI.
//!
//! Commands for querying the storefront's content repository, rendering
//! pages, and working with the content schema.

mod commands;
mod config;
mod context;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Storefront content tool.
#[derive(Parser)]
#[command(name = "content")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Read documents from a JSON or NDJSON export instead of the API.
    #[arg(long, global = true)]
    fixture: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a GROQ query and print the result.
    Query(commands::QueryArgs),

    /// List product variants in display order.
    Variants,

    /// List the latest blog posts.
    Posts(commands::PostsArgs),

    /// Show a blog post by slug.
    Post(commands::PostArgs),

    /// List this week's deal products.
    Deals,

    /// List product reels.
    Reels(commands::ReelsArgs),

    /// Show the items of an order.
    Order(commands::OrderArgs),

    /// Render a storefront page as HTML.
    Render(commands::RenderArgs),

    /// Inspect, export and validate against the content schema.
    Schema(commands::SchemaArgs),

    /// Manage configuration.
    Config(commands::ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "content=debug,content_client=debug,content_queries=debug,storefront_pages=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.fixture, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Query(args) => commands::query::run(args, &ctx).await,
        Commands::Variants => commands::variants::run(&ctx).await,
        Commands::Posts(args) => commands::posts::run(args, &ctx).await,
        Commands::Post(args) => commands::posts::show(args, &ctx).await,
        Commands::Deals => commands::deals::run(&ctx).await,
        Commands::Reels(args) => commands::reels::run(args, &ctx).await,
        Commands::Order(args) => commands::orders::run(args, &ctx).await,
        Commands::Render(args) => commands::render::run(args, &ctx).await,
        Commands::Schema(args) => commands::schema::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
