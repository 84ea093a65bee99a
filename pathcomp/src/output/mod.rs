//! Rendering a compressed value for the caller's shell.
//!
//! A child process cannot change its parent's environment, so the CLI
//! prints an assignment the shell evaluates instead. [`ShellType`] knows the
//! assignment and quoting syntax of each supported shell.

mod shell;

pub use shell::ShellType;
