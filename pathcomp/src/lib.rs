#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathcomp
//!
//! A library for shortening search-path variables such as `PATH`.
//!
//! A value is normalized (missing directories dropped, entries resolved and
//! deduplicated), then compressed in rounds: each round finds the common
//! ancestor directory whose replacement saves the most characters, creates
//! a numbered symlink to it, and rewrites every entry under it to go through
//! the link instead.
//!
//! ## Core Types
//!
//! - [`PathSyntax`] and [`PathList`]: the textual shape of a variable
//! - [`Normalizer`]: turns a raw value into a clean [`PathList`]
//! - [`PrefixCount`]: how many entries sit under each ancestor
//! - [`Compressor`] and [`CompressionReport`]: the alias-creating rounds
//! - [`CompressOperation`]: the whole backup, prepare, compress cycle
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathcomp::{PathSyntax, PrefixCount};
//! use pathcomp::engine::select_candidate;
//!
//! let syntax = PathSyntax::unix();
//! let entries = vec![
//!     "/opt/vendor-toolchain/bin".to_string(),
//!     "/opt/vendor-toolchain/lib".to_string(),
//! ];
//! let counts = PrefixCount::from_entries(&entries, syntax.dir_separator);
//! let best = select_candidate(&counts, "/l/1", &[], syntax.dir_separator).unwrap();
//! assert_eq!(best.ancestor, "/opt/vendor-toolchain");
//! ```

pub mod alias;
pub mod backup;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod fs;
pub mod logging;
pub mod operations;
pub mod output;
pub mod path;
pub mod pathset;

// Re-export commonly used types
pub use alias::{AliasDir, CleanupPolicy};
pub use backup::{BackupFile, BackupStage, BackupWriter};
pub use config::{Config, ConfigBuilder};
pub use engine::{CompressionReport, Compressor, EngineSettings, EngineState, Round};
pub use env::{EnvStore, MemoryEnv, ProcessEnv};
pub use error::{Error, Result};
pub use fs::{LinkFs, OsLinkFs};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{clean_path, CompressOperation, CompressOptions, CompressOutcome};
pub use output::ShellType;
pub use path::{PathSyntax, PrefixCount};
pub use pathset::{Normalized, Normalizer, PathList};
