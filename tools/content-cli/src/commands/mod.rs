//! CLI command implementations.

pub mod config;
pub mod deals;
pub mod orders;
pub mod posts;
pub mod query;
pub mod reels;
pub mod render;
pub mod schema;
pub mod variants;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// GROQ query text. Requires the HTTP API.
    #[arg(conflicts_with = "doc_type")]
    pub groq: Option<String>,

    /// Query documents of this type instead of passing GROQ text.
    #[arg(short = 't', long = "type")]
    pub doc_type: Option<String>,

    /// Sort key for --type queries, e.g. `publishedAt:desc`.
    #[arg(long, requires = "doc_type")]
    pub order: Option<String>,

    /// Return at most N documents for --type queries.
    #[arg(short, long, requires = "doc_type")]
    pub limit: Option<usize>,

    /// Bind a query parameter (`name=value`; the value is parsed as JSON,
    /// falling back to a string).
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

/// Arguments for the posts command.
#[derive(Args)]
pub struct PostsArgs {
    /// Number of posts to show.
    #[arg(short, long, default_value = "4", allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the post command.
#[derive(Args)]
pub struct PostArgs {
    /// Post slug.
    pub slug: String,
}

/// Arguments for the reels command.
#[derive(Args)]
pub struct ReelsArgs {
    /// Number of reels to show.
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    pub limit: i64,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order document id.
    pub id: String,
}

/// Storefront pages that can be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Home,
    Deals,
    Blog,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Page to render.
    #[arg(value_enum)]
    pub page: PageKind,

    /// Number of posts on the blog page.
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Write the HTML to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit the page body without the document shell.
    #[arg(long)]
    pub fragment: bool,
}

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Subcommand)]
pub enum SchemaCommand {
    /// List the registered types.
    List,
    /// Print the studio schema definition as JSON.
    Export {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate documents from a JSON or NDJSON file.
    Validate {
        /// Document file.
        file: String,
        /// Validate every document as this type instead of its `_type`.
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Project id to configure.
        #[arg(short, long)]
        project_id: Option<String>,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
