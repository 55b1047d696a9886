//! CLI entry point for the `dejavu` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use dejavu_engine::cli::commands::{self, MatchOptions};
use dejavu_engine::{DejavuConfig, DejavuError};

#[derive(Parser)]
#[command(
    name = "dejavu",
    about = "Déjà-vu finder: match a real-life event against your dream journal"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Path to a TOML config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank dreams against a real-life event
    Match {
        /// Path to a JSON request: {"dreams": [...], "realEvent": "...", "topN": 3}
        request: PathBuf,
        /// Read dreams from this JSON store instead of the request
        #[arg(long)]
        store: Option<PathBuf>,
        /// Save freshly fetched embeddings back to the store
        #[arg(long)]
        write_back: bool,
        /// Skip the narrative explanation step
        #[arg(long)]
        no_narrative: bool,
    },
    /// Generate and store the embedding of one dream
    Embed {
        /// Path to the JSON dream store
        store: PathBuf,
        /// Dream ID
        dream_id: String,
    },
    /// Embed every stored dream that has no embedding yet
    Backfill {
        /// Path to the JSON dream store
        store: PathBuf,
    },
    /// Show how a text is tokenized for keyword scoring
    Tokens {
        /// The text to tokenize
        text: String,
    },
    /// Print the effective configuration
    Config {
        /// Print the default config file path instead
        #[arg(long)]
        path: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => match DejavuConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(3);
            }
        },
        None => DejavuConfig::load_or_default(),
    };

    let result = match cli.command {
        Commands::Match {
            request,
            store,
            write_back,
            no_narrative,
        } => commands::cmd_match(
            &config,
            MatchOptions {
                request_path: &request,
                store_path: store.as_deref(),
                write_back,
                narrative: !no_narrative,
            },
            json,
        ),
        Commands::Embed { store, dream_id } => commands::cmd_embed(&config, &store, &dream_id, json),
        Commands::Backfill { store } => commands::cmd_backfill(&config, &store, json),
        Commands::Tokens { text } => commands::cmd_tokens(&text, json),
        Commands::Config { path } => commands::cmd_config(&config, path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            DejavuError::Io(_) => 1,
            e if e.is_input_error() => 3,
            DejavuError::Embedding { .. }
            | DejavuError::EmbeddingCountMismatch { .. }
            | DejavuError::DimensionMismatch { .. } => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
