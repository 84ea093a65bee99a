//! Compress command implementation.
//!
//! This module implements the `compress` command: it runs a compression,
//! reports the lengths, asks before writing, and prints a shell assignment
//! the calling shell can evaluate.

use crate::error::CliError;
use crate::utils::{confirm, load_configuration, read_value, GlobalOptions};
use clap::Args;
use pathcomp::pathset::SkipReason;
use pathcomp::{
    CompressOperation, CompressOptions, CompressOutcome, Config, OsLinkFs, ProcessEnv, ShellType,
};
use std::path::PathBuf;

/// Compress a search-path variable.
#[derive(Args)]
pub struct CompressCommand {
    /// Variable to compress (default: PATH)
    #[arg(long, value_name = "NAME")]
    pub variable: Option<String>,

    /// Minimum characters a round must save
    #[arg(long, value_name = "CHARS")]
    pub threshold: Option<usize>,

    /// Directory holding aliases and backups
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Compress this value instead of reading the variable
    #[arg(long, value_name = "RAW")]
    pub value: Option<String>,

    /// Write without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Shell syntax for the printed assignment (default: detected)
    #[arg(long, value_name = "SHELL")]
    pub shell: Option<String>,
}

impl CompressCommand {
    /// Execute the compress command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate arguments before anything touches the disk
        let shell = match self.shell {
            Some(ref name) => ShellType::from_string(name)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            None => ShellType::detect(),
        };
        if self.threshold == Some(0) {
            return Err(CliError::InvalidArguments(
                "--threshold must be greater than 0".to_string(),
            ));
        }

        // 2. Load configuration with flags on top
        let config = load_configuration(
            global,
            Config {
                variable: self.variable,
                threshold: self.threshold,
                work_dir: self.work_dir,
                ..Default::default()
            },
        )?;
        let options = CompressOptions::from_config(&config)?;

        // 3. Run the compression
        let raw = read_value(&options.variable, self.value)?;
        let outcome = CompressOperation::run_on_value(&OsLinkFs::new(), &raw, &options)?;

        // 4. Report
        if !global.quiet {
            print_summary(&outcome, global.verbose);
        }

        if !outcome.changes_value() {
            if !global.quiet {
                eprintln!("{} is unchanged; nothing to write", outcome.variable);
            }
            return Ok(());
        }

        // 5. Confirm and apply
        if !self.yes && !confirm(&format!("Write to {}?", outcome.variable))? {
            return Err(CliError::SemanticFailure(format!(
                "Aborted; {} left unchanged",
                outcome.variable
            )));
        }

        let after = outcome.apply(&ProcessEnv::new())?;
        if global.verbose {
            eprintln!("Backup written to {}", after.display());
        }

        println!(
            "{}",
            shell.format_export(&outcome.variable, &outcome.compressed_value())
        );
        Ok(())
    }
}

fn print_summary(outcome: &CompressOutcome, verbose: bool) {
    let report = &outcome.report;

    let skipped = &report.normalized.skipped;
    if !skipped.is_empty() {
        let missing = skipped
            .iter()
            .filter(|s| s.reason == SkipReason::Missing)
            .count();
        eprintln!(
            "Dropped {} segment(s) ({missing} missing, {} unresolvable)",
            skipped.len(),
            skipped.len() - missing
        );
    }

    if !outcome.removed_aliases.is_empty() {
        eprintln!(
            "Removed {} alias(es) from an earlier run",
            outcome.removed_aliases.len()
        );
    }

    for (alias, target) in report.aliases() {
        eprintln!("Created {alias} -> {target}");
    }

    eprintln!("Original:   {}", report.original);
    eprintln!("Compressed: {}", outcome.compressed_value());
    eprintln!("{} -> {}", report.original_len(), report.compressed_len());

    if verbose {
        eprintln!("Before-backup: {}", outcome.before_backup.display());
    }
}
