//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AnalyzeCommand, BackupsCommand, CleanCommand, CompletionsCommand, CompressCommand,
    ShowConfigCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shorten search-path variables with numbered directory aliases.
#[derive(Parser)]
#[command(name = "pathcomp")]
#[command(version, about = "Shorten search-path variables with directory aliases", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Additional configuration file, above the user config
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PATHCOMP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Compress a search-path variable
    Compress(CompressCommand),

    /// Print the normalized value without compressing it
    Clean(CleanCommand),

    /// Show how many entries share each ancestor directory
    Analyze(AnalyzeCommand),

    /// List backups in the working directory
    Backups(BackupsCommand),

    /// Print the effective configuration
    ShowConfig(ShowConfigCommand),

    /// Check a configuration file for errors
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
