//! Where variable values are read from and written to.

use std::cell::RefCell;
use std::collections::HashMap;
use std::env;

use crate::error::{Error, Result};

/// A key-value store of environment variables.
pub trait EnvStore {
    /// Value of `name`, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Set `name` to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn set(&self, name: &str, value: &str) -> Result<()>;
}

/// The environment of the current process.
///
/// Writes only affect this process and its children. Persisting a value for
/// the user's shell is the caller's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Create the process-backed store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(Error::Environment {
            name: name.to_string(),
            reason: "not a valid variable name".to_string(),
        });
    }
    Ok(())
}

impl EnvStore for ProcessEnv {
    fn get(&self, name: &str) -> Result<Option<String>> {
        check_name(name)?;
        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(Error::Environment {
                name: name.to_string(),
                reason: "value is not valid UTF-8".to_string(),
            }),
        }
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        check_name(name)?;
        if value.contains('\0') {
            return Err(Error::Environment {
                name: name.to_string(),
                reason: "value contains a NUL byte".to_string(),
            });
        }
        env::set_var(name, value);
        Ok(())
    }
}

/// An in-memory store.
///
/// # Examples
///
/// ```
/// use pathcomp::env::{EnvStore, MemoryEnv};
///
/// let store = MemoryEnv::with([("PATH", "/bin")]);
/// assert_eq!(store.get("PATH").unwrap().as_deref(), Some("/bin"));
/// store.set("PATH", "/usr/bin").unwrap();
/// assert_eq!(store.get("PATH").unwrap().as_deref(), Some("/usr/bin"));
/// assert_eq!(store.get("HOME").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RefCell<HashMap<String, String>>,
}

impl MemoryEnv {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `vars`.
    #[must_use]
    pub fn with<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RefCell::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, name: &str) -> Result<Option<String>> {
        check_name(name)?;
        Ok(self.vars.borrow().get(name).cloned())
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        check_name(name)?;
        self.vars
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}
