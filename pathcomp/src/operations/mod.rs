//! High-level operations built on the engine.
//!
//! [`CompressOperation`] is the whole user-facing compression: it reads the
//! variable, backs it up, prepares the alias directory, runs the engine, and
//! hands back an outcome that is only written once applied.
//! [`clean_path`] is normalization on its own.
//!
//! # Examples
//!
//! ```no_run
//! use pathcomp::env::ProcessEnv;
//! use pathcomp::fs::OsLinkFs;
//! use pathcomp::operations::{CompressOperation, CompressOptions};
//! use pathcomp::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let options = CompressOptions::from_config(&config).unwrap();
//! let store = ProcessEnv::new();
//!
//! let outcome = CompressOperation::run(&OsLinkFs::new(), &store, &options).unwrap();
//! if outcome.changes_value() {
//!     outcome.apply(&store).unwrap();
//! }
//! ```

pub mod compress;

pub use compress::{clean_path, CompressOperation, CompressOptions, CompressOutcome};
