//! Shelf CLI - Command line tool for browsing a product catalog.
//!
//! Commands:
//! - `shelf browse` - Fetch and print one page of products
//! - `shelf suggest` - Type-ahead suggestions over the page scope
//! - `shelf query` - Print the canonical query without fetching
//! - `shelf facets` - List the facet catalog
//! - `shelf config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, ConfigArgs, FacetsArgs, QueryArgs, SuggestArgs};

/// Shelf CLI - Browse a product catalog from the terminal
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog base URL (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print one page of products
    Browse(BrowseArgs),

    /// Suggest products by name
    Suggest(SuggestArgs),

    /// Print the canonical query for a set of filters
    Query(QueryArgs),

    /// List categories, brands and other facets
    Facets(FacetsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), cli.endpoint.as_deref(), output)?;
    ctx.init_logging()?;

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Query(args) => commands::query::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
