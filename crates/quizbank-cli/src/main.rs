//! quizbank CLI — the user-facing trivia game.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod console;

use commands::play::PlayArgs;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Text-based trivia quiz game")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Question bank file (overrides config)
    #[arg(long, global = true)]
    bank: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive main menu (the default)
    Menu,

    /// Play one session
    Play {
        /// Grade level: ELEMENTARY or "HIGH SCHOOL"
        #[arg(long)]
        grade: Option<String>,

        /// Difficulty: Easy, Medium, or Hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Number of questions (default: whole section)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Player name
        #[arg(long)]
        name: Option<String>,
    },

    /// Continue a saved game
    Resume {
        /// Player name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Parse the question bank and report section counts
    Validate,

    /// Create starter config and sample question bank
    Init,
}

fn main() {
    // RUST_LOG replaces the default filter entirely.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizbank=warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Menu);
    if let Commands::Init = command {
        return commands::init::execute();
    }

    let mut config = config::load_config_from(cli.config.as_deref())?;
    if let Some(bank) = cli.bank {
        config.bank_path = bank;
    }

    match command {
        Commands::Menu => commands::menu::execute(&config),
        Commands::Play {
            grade,
            difficulty,
            limit,
            name,
        } => commands::play::execute(
            &config,
            PlayArgs {
                grade,
                difficulty,
                limit,
                name,
            },
        ),
        Commands::Resume { name } => commands::resume::execute(&config, name),
        Commands::Leaderboard { format } => {
            commands::leaderboard::execute(&config.scores_path, &format)
        }
        Commands::Validate => commands::validate::execute(&config.bank_path),
        Commands::Init => commands::init::execute(),
    }
}
