//! Logsheet Combiner CLI — the main entry point.
//!
//! Commands:
//! - `merge`       — Merge a logsheet and its update log into a master file
//! - `directory`   — Show, save or forget the working directory
//! - `config`      — Inspect and initialise configuration
//! - `completions` — Print shell completions

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "logsheet",
    about = "Logsheet Combiner — merge a logsheet and its update log into one master file",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the logsheet and its updates into a master file
    #[command(alias = "combine")]
    Merge(commands::merge::MergeArgs),

    /// Manage the saved working directory
    Directory {
        #[command(subcommand)]
        action: DirectoryAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum DirectoryAction {
    /// Show the saved directory
    Show,
    /// Save a directory for `merge --use-saved-directory`
    Set {
        /// Directory holding the logsheet files
        directory: String,
    },
    /// Forget the saved directory
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Check the config file
    Validate,
    /// Write a default config file if none exists
    Init,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Merge(args) => commands::merge::run(args)?,
        Commands::Directory { action } => match action {
            DirectoryAction::Show => commands::directory::show()?,
            DirectoryAction::Set { directory } => commands::directory::set(&directory)?,
            DirectoryAction::Clear => commands::directory::clear()?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
            ConfigAction::Validate => commands::config_cmd::validate()?,
            ConfigAction::Init => commands::config_cmd::init()?,
        },
        Commands::Completions { shell } => {
            commands::completions::run::<Cli>(shell, &mut std::io::stdout())
        }
    }

    Ok(())
}
