//! Path text handling: syntax, ancestors, and canonicalization.
//!
//! # Key Concepts
//!
//! ## Syntax
//!
//! A search-path variable is a list of entries joined by a delimiter, each
//! entry being a directory whose components are joined by a separator. Both
//! characters come from [`PathSyntax`] rather than the host, so a Windows
//! value can be analyzed on Linux and vice versa.
//!
//! ## Ancestors
//!
//! The ancestor chain of an entry runs from the entry itself up to its root
//! (`/a/b/c` → `/a/b/c`, `/a/b`, `/a`, `/`). [`PrefixCount`] tallies, for a
//! whole list, how many entries each ancestor prefixes.
//!
//! ## Canonicalization
//!
//! Canonicalization follows links to the real directory. It is what makes
//! `C:\.\.\` and `C:\` the same entry, and what keeps an alias from ever
//! pointing at another alias.
//!
//! # Examples
//!
//! ```
//! use pathcomp::path::{ancestors::ancestors, PathSyntax, PrefixCount};
//!
//! let syntax = PathSyntax::unix();
//! let entries: Vec<&str> = syntax.split("/opt/a/bin:/opt/a/lib").collect();
//!
//! assert_eq!(ancestors(entries[0], '/'), vec!["/opt/a/bin", "/opt/a", "/opt", "/"]);
//!
//! let counts = PrefixCount::from_entries(&entries, syntax.dir_separator);
//! assert_eq!(counts.get("/opt/a"), 2);
//! ```

pub mod ancestors;
pub mod canonicalize;
pub mod normalize;
mod syntax;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use ancestors::PrefixCount;
pub use syntax::{char_len, PathSyntax};
