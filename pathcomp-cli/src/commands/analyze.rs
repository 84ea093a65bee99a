//! Analyze command implementation.
//!
//! Prints how many normalized entries each ancestor directory prefixes,
//! and the ancestor the next compression round would alias.

use crate::error::CliError;
use crate::utils::{load_configuration, read_value, GlobalOptions};
use clap::Args;
use pathcomp::engine::{select_candidate, EngineSettings};
use pathcomp::{clean_path, AliasDir, Config, OsLinkFs, PrefixCount};
use serde::Serialize;

/// Show how many entries share each ancestor directory.
#[derive(Args)]
pub struct AnalyzeCommand {
    /// Variable to read (default: PATH)
    #[arg(long, value_name = "NAME")]
    pub variable: Option<String>,

    /// Analyze this value instead of reading the variable
    #[arg(long, value_name = "RAW")]
    pub value: Option<String>,

    /// Number of ancestors to show
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PrefixRow<'a> {
    ancestor: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct Analysis<'a> {
    entries: usize,
    prefixes: Vec<PrefixRow<'a>>,
    next_alias: String,
    best_candidate: Option<&'a str>,
    best_score: Option<usize>,
}

impl AnalyzeCommand {
    /// Execute the analyze command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(
            global,
            Config {
                variable: self.variable,
                ..Default::default()
            },
        )?;
        let syntax = config.syntax()?;
        let separator = syntax.dir_separator;

        let fs = OsLinkFs::new();
        let raw = read_value(config.variable_or_default(), self.value)?;
        let cleaned = clean_path(&fs, syntax, &raw)?;
        let counts = PrefixCount::from_entries(cleaned.list.entries(), separator);

        let aliases = AliasDir::new(config.work_dir_or_default()?, separator)?;
        let settings =
            EngineSettings::new(aliases, syntax).with_link_roots(config.link_roots_or_default());
        let slot = settings
            .aliases
            .next_slot(&fs, config.cleanup_or_default())?;
        let next_alias = settings.aliases.slot_path(slot);
        let best = select_candidate(&counts, &next_alias, &settings.effective_roots(), separator);

        let analysis = Analysis {
            entries: cleaned.list.len(),
            prefixes: counts
                .top(self.top)
                .into_iter()
                .map(|(ancestor, count)| PrefixRow { ancestor, count })
                .collect(),
            next_alias,
            best_candidate: best.as_ref().map(|c| c.ancestor.as_str()),
            best_score: best.as_ref().map(|c| c.score),
        };

        if self.json {
            let json = serde_json::to_string_pretty(&analysis)
                .map_err(|e| CliError::SemanticFailure(format!("cannot render JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        println!("{} entries", analysis.entries);
        for row in &analysis.prefixes {
            println!("{:>6}  {}", row.count, row.ancestor);
        }
        match (analysis.best_candidate, analysis.best_score) {
            (Some(ancestor), Some(score)) => {
                println!("Next alias {}: {ancestor} (score {score})", analysis.next_alias);
            }
            _ => println!("No ancestor is worth aliasing"),
        }
        Ok(())
    }
}
