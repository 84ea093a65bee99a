//! Command to print a normalized value.

use crate::error::CliError;
use crate::utils::{load_configuration, read_value, GlobalOptions};
use clap::Args;
use pathcomp::{clean_path, Config, OsLinkFs};

/// Print the normalized value without compressing it.
#[derive(Args)]
pub struct CleanCommand {
    /// Variable to read (default: PATH)
    #[arg(long, value_name = "NAME")]
    pub variable: Option<String>,

    /// Clean this value instead of reading the variable
    #[arg(long, value_name = "RAW")]
    pub value: Option<String>,
}

impl CleanCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(
            global,
            Config {
                variable: self.variable,
                ..Default::default()
            },
        )?;
        let syntax = config.syntax()?;

        let raw = read_value(config.variable_or_default(), self.value)?;
        let cleaned = clean_path(&OsLinkFs::new(), syntax, &raw)?;

        if !global.quiet && !cleaned.skipped.is_empty() {
            eprintln!("Dropped {} segment(s)", cleaned.skipped.len());
        }

        println!("{}", cleaned.list.serialize(&syntax));
        Ok(())
    }
}
