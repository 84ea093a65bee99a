//! Build script for pathcomp-cli.
//!
//! Renders the `pathcomp.1` man page into `OUT_DIR/man` with clap_mangen.
//! Build scripts cannot depend on the crate being built, so the command
//! structure is restated here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// The CLI shape for man page generation. Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("pathcomp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shorten search-path variables with directory aliases")
        .long_about(
            "Shorten PATH-like variables by replacing long shared directory prefixes \
             with numbered symbolic links kept in a working directory",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file, above the user config")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PATHCOMP_DATA_DIR"),
        )
        .subcommands(vec![
            Command::new("compress")
                .about("Compress a search-path variable")
                .long_about(
                    "Normalize the variable, alias shared ancestors in rounds, and print \
                     an assignment for the calling shell after confirmation",
                ),
            Command::new("clean")
                .about("Print the normalized value without compressing it")
                .long_about("Drop missing directories, resolve links, and remove duplicates"),
            Command::new("analyze")
                .about("Show how many entries share each ancestor directory")
                .long_about("Print prefix counts and the ancestor the next round would alias"),
            Command::new("backups")
                .about("List backups in the working directory")
                .long_about("List values saved before and after each compression, newest first"),
            Command::new("show-config")
                .about("Print the effective configuration")
                .long_about("Print the merged configuration from all sources as YAML"),
            Command::new("validate")
                .about("Check a configuration file for errors")
                .long_about("Parse and validate a pathcomp configuration file"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = std::env::var("OUT_DIR")
        .map(PathBuf::from)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("pathcomp.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
