use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use mdtrim::cli;

#[derive(Debug, Parser)]
#[command(name = "mdtrim")]
#[command(about = "Markdown whitespace trimmer")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Trim whitespace in files (or stdin) and print or rewrite the result
    Fmt {
        /// Files to trim; reads stdin when empty
        files: Vec<PathBuf>,
        /// Rewrite files in place instead of printing to stdout
        #[arg(long)]
        write: bool,
    },
    /// Check whether files are already trimmed — exits nonzero if not
    Check {
        /// Files to check; reads stdin when empty
        files: Vec<PathBuf>,
    },
    /// Show, initialize, or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective merged configuration
    Show,
    /// Write the default config to ~/.mdtrim/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a single value, e.g. `mdtrim config set trim.TrimOnSave false`
    Set {
        /// Dotted key path (trim.TrimOnSave, logging.enabled, ...)
        key: String,
        /// New value
        value: String,
    },
    /// Reset the config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Fmt { files, write } => cli::run_fmt(&files, write),
        Commands::Check { files } => cli::run_check(&files),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
