//! CLI binary for bookshelf.

use bookshelf::commands;
use bookshelf::{BookshelfConfig, ContentOrder, OutputFormat};
use bookshelf_search::BookId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bookshelf: search a remote book catalog by title, author, keyword, or pattern.
#[derive(Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search titles, authors, and content for a keyword or pattern.
    Search {
        /// Keyword or regular expression. Omit to search with an empty query.
        query: Option<String>,

        /// Show content matches ordered by popularity (closeness centrality).
        #[arg(long)]
        ordered: bool,

        /// Print the full result set as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show details of a single book.
    Book {
        /// Book id.
        #[arg(default_value = "1")]
        id: String,

        /// Print the book as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List books similar to the given ones.
    Suggest {
        /// Ids of the books to find neighbours for.
        #[arg(required = true)]
        ids: Vec<String>,

        /// Print the books as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Configuration file commands.
#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a default config file to `--config` or the default location.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf=info,bookshelf_search=info")),
        )
        .init();

    let cli = Cli::parse();
    if let Command::Config(ConfigCommand::Init { force }) = cli.command {
        print!("{}", commands::init_config(cli.config.as_deref(), force)?);
        return Ok(());
    }
    let config = BookshelfConfig::load(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Search {
            query,
            ordered,
            json,
        } => {
            let order = if ordered {
                ContentOrder::Closeness
            } else {
                ContentOrder::Relevance
            };
            commands::search(&config, query.as_deref(), order, format(json)).await?
        }
        Command::Book { id, json } => {
            commands::book(&config, &BookId::from(id), format(json)).await?
        }
        Command::Suggest { ids, json } => commands::suggest(&config, &ids, format(json)).await?,
        Command::Config(_) => return Ok(()),
    };

    print!("{output}");
    Ok(())
}

fn format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}
