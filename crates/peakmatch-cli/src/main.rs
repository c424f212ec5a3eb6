//! peakmatch CLI: the pair-them-up quiz in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "peakmatch", version, about = "Match-the-pairs quiz with score history")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz
    Play {
        /// Your name, stored with the score
        #[arg(long)]
        name: String,

        /// Dataset TOML to play (default: built-in mountains)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Shuffle seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show past sessions, most recent first
    History {
        /// Only show sessions of this player
        #[arg(long)]
        user: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete all past sessions
    ClearHistory {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate dataset TOML files
    Validate {
        /// Path to dataset file or directory
        #[arg(long)]
        dataset: PathBuf,
    },

    /// Create starter config and example dataset
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peakmatch=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            name,
            dataset,
            seed,
            config,
        } => commands::play::execute(name, dataset, seed, config).await,
        Commands::History {
            user,
            format,
            config,
        } => commands::history::execute(user, format, config),
        Commands::ClearHistory { yes, config } => commands::clear_history::execute(yes, config),
        Commands::Validate { dataset } => commands::validate::execute(dataset),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
