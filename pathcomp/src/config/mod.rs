//! Configuration system for pathcomp.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and an explicit file)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHCOMP_*`)
//! 3. Explicit config file (`ConfigBuilder::with_config_file`)
//! 4. User config (`~/.pathcomp/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```no_run
//! use pathcomp::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .build()
//!     .unwrap();
//!
//! println!("Compressing {} with threshold {}",
//!     config.variable_or_default(),
//!     config.threshold_or_default());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use pathcomp::config::{Config, ConfigBuilder};
//! use pathcomp::alias::CleanupPolicy;
//!
//! let custom = Config {
//!     variable: Some("MANPATH".to_string()),
//!     cleanup: Some(CleanupPolicy::Unreferenced),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_data_dir("/tmp/pathcomp-data")
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.variable, Some("MANPATH".to_string()));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{default_data_dir, default_work_dir, Config};
pub use validator::ConfigValidator;
