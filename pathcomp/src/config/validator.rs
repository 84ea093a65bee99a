//! Configuration validation.
//!
//! This module checks that configured values can be used together: the
//! variable name must be settable, the threshold positive, and nothing that
//! ends up inside the variable text may contain the list delimiter.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use pathcomp::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration. Unset fields are not checked.
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref variable) = config.variable {
            Self::validate_variable_name(variable)?;
        }

        if config.threshold == Some(0) {
            return Err(Error::Validation {
                field: "threshold".into(),
                message: "Must be greater than 0".into(),
            });
        }

        let syntax = config.syntax()?;

        if let Some(ref dir) = config.work_dir {
            let text = dir.to_str().ok_or_else(|| Error::Validation {
                field: "work_dir".into(),
                message: "Must be valid UTF-8".into(),
            })?;
            if text.trim().is_empty() {
                return Err(Error::Validation {
                    field: "work_dir".into(),
                    message: "Cannot be empty".into(),
                });
            }
            Self::reject_delimiter("work_dir", text, syntax.list_delimiter)?;
        }

        if let Some(ref roots) = config.link_roots {
            for (i, root) in roots.iter().enumerate() {
                let field = format!("link_roots[{i}]");
                if root.trim().is_empty() {
                    return Err(Error::Validation {
                        field,
                        message: "Cannot be empty".into(),
                    });
                }
                Self::reject_delimiter(&field, root, syntax.list_delimiter)?;
            }
        }

        Ok(())
    }

    /// Validate an environment variable name.
    ///
    /// Names must be non-empty and free of `=`, whitespace, and NUL.
    fn validate_variable_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation {
                field: "variable".into(),
                message: "Cannot be empty".into(),
            });
        }

        if name.contains('=') || name.contains('\0') || name.chars().any(char::is_whitespace) {
            return Err(Error::Validation {
                field: "variable".into(),
                message: format!("'{name}' is not a valid environment variable name"),
            });
        }

        Ok(())
    }

    fn reject_delimiter(field: &str, value: &str, delimiter: char) -> Result<()> {
        if value.contains(delimiter) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Cannot contain the list delimiter '{delimiter}'"),
            });
        }
        Ok(())
    }
}
