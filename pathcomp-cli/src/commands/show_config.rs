//! Command to print the effective configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use pathcomp::Config;

/// Print the effective configuration as YAML.
#[derive(Args)]
pub struct ShowConfigCommand {}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, Config::default())?;
        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CliError::Config(format!("cannot render configuration: {e}")))?;
        print!("{yaml}");
        Ok(())
    }
}
