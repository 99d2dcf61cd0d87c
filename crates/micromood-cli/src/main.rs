use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use micromood_core::Config;

mod commands;

/// Environment variable holding a tracing filter, e.g. `micromood_core=debug`.
const LOG_ENV: &str = "MICROMOOD_LOG";

#[derive(Parser)]
#[command(name = "micromood", version, about = "MicroMood - mood journal and microtask coach")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record how you feel and get microtask suggestions
    Track(commands::track::TrackArgs),
    /// Get microtask suggestions without recording anything
    Suggest(commands::track::SuggestArgs),
    /// Summary statistics and mood chart
    Progress {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recorded entries
    History {
        /// Only show the last N entries
        #[arg(long)]
        limit: Option<usize>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all mood data
    Clear {
        /// Acknowledge that every entry will be deleted
        #[arg(long)]
        yes: bool,
    },
    /// Show companions or pick one
    Companion {
        /// Companion to select (buddy, sage, sunny, zen)
        name: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Track(args) => commands::track::run(&config, args),
        Commands::Suggest(args) => commands::track::suggest(&config, args),
        Commands::Progress { json } => commands::progress::run(&config, json),
        Commands::History { limit, json } => commands::history::run(&config, limit, json),
        Commands::Clear { yes } => commands::clear::run(&config, yes),
        Commands::Companion { name } => commands::companion::run(&config, name),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
