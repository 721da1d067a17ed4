mod cli;
mod server;
mod tools;

use std::path::PathBuf;

use almanac::config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "almanac", version, about = "Personal knowledge base with AI-assisted ingestion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport unless --http or config says otherwise)
    Serve {
        /// Serve Streamable HTTP at /mcp instead of stdio
        #[arg(long)]
        http: bool,
    },
    /// Rank articles by keyword overlap with a query
    Search {
        query: String,
        /// Maximum number of results to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print one article in full
    Show { id: String },
    /// List every article with its keywords
    List,
    /// Add a text file to the knowledge base via AI extraction
    Ingest { file: PathBuf },
    /// Answer a question from an article's content
    Ask {
        question: String,
        /// Article to use as context (defaults to the best search match)
        #[arg(long)]
        article: Option<String>,
    },
    /// Export the knowledge base as JSON (stdout unless --output)
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace the knowledge base with the contents of a JSON file
    Import { file: PathBuf },
    /// Restore the built-in default articles
    Reset,
    /// Check storage health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::AlmanacConfig::load()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC and exports.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { http } => {
            if http || config.server.transport == "http" {
                server::serve_sse(config).await?;
            } else {
                server::serve_stdio(config).await?;
            }
        }
        Command::Search { query, limit } => cli::search::search(&config, &query, limit)?,
        Command::Show { id } => cli::inspect::show(&config, &id)?,
        Command::List => cli::inspect::list(&config)?,
        Command::Ingest { file } => cli::ingest::ingest(&config, &file).await?,
        Command::Ask { question, article } => {
            cli::ask::ask(&config, &question, article.as_deref()).await?
        }
        Command::Export { output } => cli::export::export(&config, output.as_deref())?,
        Command::Import { file } => cli::import::import(&config, &file)?,
        Command::Reset => cli::reset::reset(&config)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
