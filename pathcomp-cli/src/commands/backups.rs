//! Command to list value backups.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, shorten_path, GlobalOptions};
use clap::Args;
use pathcomp::{BackupStage, BackupWriter, Config};
use std::path::PathBuf;

/// List backups in the working directory.
#[derive(Args)]
pub struct BackupsCommand {
    /// Directory holding aliases and backups
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Print the newest value saved before a compression instead of the list
    #[arg(long)]
    pub latest_before: bool,
}

impl BackupsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(
            global,
            Config {
                work_dir: self.work_dir,
                ..Default::default()
            },
        )?;
        let writer = BackupWriter::new(config.work_dir_or_default()?);
        let backups = writer.list()?;

        if self.latest_before {
            let latest = backups
                .iter()
                .find(|b| b.stage == BackupStage::Before)
                .ok_or_else(|| {
                    CliError::SemanticFailure(format!(
                        "No backups in {}",
                        shorten_path(writer.dir())
                    ))
                })?;
            println!("{}", latest.read()?);
            return Ok(());
        }

        if backups.is_empty() {
            if !global.quiet {
                eprintln!("No backups in {}", shorten_path(writer.dir()));
            }
            return Ok(());
        }

        for backup in &backups {
            println!(
                "{}  {:<6}  {}",
                format_timestamp(backup.created_at),
                backup.stage.to_string(),
                backup.path.display()
            );
        }
        Ok(())
    }
}
