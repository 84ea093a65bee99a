//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `compress`: Compress a search-path variable and print the assignment
//! - `clean`: Print the normalized value
//! - `analyze`: Show prefix counts and the next alias candidate
//! - `backups`: List value backups in the working directory
//! - `show_config`: Print the effective configuration
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod analyze;
pub mod backups;
pub mod clean;
pub mod completions;
pub mod compress;
pub mod show_config;
pub mod validate;

pub use analyze::AnalyzeCommand;
pub use backups::BackupsCommand;
pub use clean::CleanCommand;
pub use completions::CompletionsCommand;
pub use compress::CompressCommand;
pub use show_config::ShowConfigCommand;
pub use validate::ValidateCommand;
