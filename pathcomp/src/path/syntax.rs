//! Path-list syntax: the list delimiter and directory separator.
//!
//! Search-path variables use platform-dependent punctuation (`;` and `\` on
//! Windows, `:` and `/` elsewhere). Every component that splits, joins, or
//! walks entries takes a [`PathSyntax`] instead of hard-coding either
//! character, so a Windows-style value can be processed on any host.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Delimiter and separator characters for one path-list dialect.
///
/// # Examples
///
/// ```
/// use pathcomp::path::PathSyntax;
///
/// let syntax = PathSyntax::windows();
/// let parts: Vec<&str> = syntax.split(r"C:\a;;C:\b").collect();
/// assert_eq!(parts, vec![r"C:\a", r"C:\b"]);
/// assert_eq!(syntax.join(&parts), r"C:\a;C:\b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSyntax {
    /// Character separating entries in the variable.
    pub list_delimiter: char,
    /// Character separating components inside one entry.
    pub dir_separator: char,
}

impl PathSyntax {
    /// Create a syntax from explicit characters.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the characters are equal or
    /// alphanumeric.
    pub fn new(list_delimiter: char, dir_separator: char) -> Result<Self> {
        let syntax = Self {
            list_delimiter,
            dir_separator,
        };
        syntax.validate()?;
        Ok(syntax)
    }

    /// Windows conventions: `;` between entries, `\` inside them.
    #[must_use]
    pub const fn windows() -> Self {
        Self {
            list_delimiter: ';',
            dir_separator: '\\',
        }
    }

    /// Unix conventions: `:` between entries, `/` inside them.
    #[must_use]
    pub const fn unix() -> Self {
        Self {
            list_delimiter: ':',
            dir_separator: '/',
        }
    }

    /// The conventions of the host platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::unix()
        }
    }

    /// Check that the two characters can be told apart from path text.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.list_delimiter == self.dir_separator {
            return Err(Error::Validation {
                field: "list_delimiter".into(),
                message: format!(
                    "must differ from dir_separator (both are '{}')",
                    self.list_delimiter
                ),
            });
        }
        for (field, c) in [
            ("list_delimiter", self.list_delimiter),
            ("dir_separator", self.dir_separator),
        ] {
            if c.is_alphanumeric() || c.is_whitespace() {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("'{c}' cannot be used as punctuation"),
                });
            }
        }
        Ok(())
    }

    /// Split a raw variable value into its non-empty segments.
    pub fn split<'a>(&self, raw: &'a str) -> impl Iterator<Item = &'a str> {
        raw.split(self.list_delimiter).filter(|s| !s.is_empty())
    }

    /// Join entries back into a variable value.
    #[must_use]
    pub fn join<S: AsRef<str>>(&self, entries: &[S]) -> String {
        let mut out = String::with_capacity(self.serialized_len(entries));
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push(self.list_delimiter);
            }
            out.push_str(entry.as_ref());
        }
        out
    }

    /// Character length of [`join`](Self::join) without building the string.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcomp::path::PathSyntax;
    ///
    /// let syntax = PathSyntax::unix();
    /// assert_eq!(syntax.serialized_len(&["/a", "/bc"]), 6);
    /// assert_eq!(syntax.serialized_len::<&str>(&[]), 0);
    /// ```
    #[must_use]
    pub fn serialized_len<S: AsRef<str>>(&self, entries: &[S]) -> usize {
        let chars: usize = entries.iter().map(|e| char_len(e.as_ref())).sum();
        chars + entries.len().saturating_sub(1)
    }
}

impl Default for PathSyntax {
    fn default() -> Self {
        Self::native()
    }
}

/// Number of characters (not bytes) in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
