//! Shell detection and export formatting.

use std::env;
use std::fmt;

use crate::Result;

/// Supported shell types for export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// Bourne Again Shell (bash).
    Bash,
    /// Z Shell (zsh).
    Zsh,
    /// Friendly Interactive Shell (fish).
    Fish,
    /// `PowerShell`.
    PowerShell,
    /// Windows `cmd.exe`.
    Cmd,
}

impl ShellType {
    /// Detect the current shell from environment variables.
    ///
    /// Detection precedence:
    /// 1. `ZSH_VERSION` - indicates zsh
    /// 2. `FISH_VERSION` - indicates fish
    /// 3. `PSModulePath` - indicates `PowerShell`
    /// 4. `SHELL` environment variable (path like `/bin/bash`)
    /// 5. `ComSpec` on Windows - indicates cmd
    /// 6. Default to bash if unable to determine
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from(|name| env::var(name).ok())
    }

    /// [`detect`](Self::detect) reading variables through `lookup`.
    #[must_use]
    pub fn detect_from<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        if lookup("ZSH_VERSION").is_some() {
            return Self::Zsh;
        }
        if lookup("FISH_VERSION").is_some() {
            return Self::Fish;
        }
        if lookup("PSModulePath").is_some() {
            return Self::PowerShell;
        }

        if let Some(shell_path) = lookup("SHELL") {
            if shell_path.contains("zsh") {
                return Self::Zsh;
            } else if shell_path.contains("fish") {
                return Self::Fish;
            } else if shell_path.contains("pwsh") || shell_path.contains("powershell") {
                return Self::PowerShell;
            }
            return Self::Bash;
        }

        if lookup("ComSpec").is_some_and(|shell| shell.to_lowercase().ends_with("cmd.exe")) {
            return Self::Cmd;
        }

        Self::Bash
    }

    /// Parse a shell type from a string.
    ///
    /// Accepts "bash", "sh", "zsh", "fish", "powershell", "pwsh", "ps" and
    /// "cmd" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the shell name is not recognized.
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" | "ps" => Ok(Self::PowerShell),
            "cmd" => Ok(Self::Cmd),
            _ => Err(crate::Error::Validation {
                field: "shell".to_string(),
                message: format!(
                    "unknown shell type '{s}': supported shells are bash, zsh, fish, powershell, cmd"
                ),
            }),
        }
    }

    /// Format an assignment of `value` to `var` for this shell.
    ///
    /// Values are quoted so directory names with spaces or quotes survive
    /// evaluation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcomp::output::ShellType;
    ///
    /// assert_eq!(ShellType::Bash.format_export("PATH", "/l/1:/bin"), "export PATH='/l/1:/bin'");
    /// assert_eq!(ShellType::Fish.format_export("PATH", "/l/1:/bin"), "set -gx PATH '/l/1:/bin'");
    /// assert_eq!(
    ///     ShellType::PowerShell.format_export("Path", r"C:\l\1;C:\Windows"),
    ///     r"$env:Path = 'C:\l\1;C:\Windows'"
    /// );
    /// assert_eq!(ShellType::Cmd.format_export("Path", r"C:\l\1"), r#"set "Path=C:\l\1""#);
    /// ```
    #[must_use]
    pub fn format_export(&self, var: &str, value: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => format!("export {var}={}", posix_quote(value)),
            Self::Fish => format!("set -gx {var} {}", fish_quote(value)),
            Self::PowerShell => format!("$env:{var} = '{}'", value.replace('\'', "''")),
            Self::Cmd => format!("set \"{var}={value}\""),
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bash => write!(f, "bash"),
            Self::Zsh => write!(f, "zsh"),
            Self::Fish => write!(f, "fish"),
            Self::PowerShell => write!(f, "powershell"),
            Self::Cmd => write!(f, "cmd"),
        }
    }
}

/// Single-quote for POSIX shells; embedded quotes become `'\''`.
fn posix_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Single-quote for fish, where only `\` and `'` need escaping.
fn fish_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_string() {
        assert_eq!(ShellType::from_string("bash").unwrap(), ShellType::Bash);
        assert_eq!(ShellType::from_string("SH").unwrap(), ShellType::Bash);
        assert_eq!(ShellType::from_string("Zsh").unwrap(), ShellType::Zsh);
        assert_eq!(ShellType::from_string("fish").unwrap(), ShellType::Fish);
        assert_eq!(
            ShellType::from_string("pwsh").unwrap(),
            ShellType::PowerShell
        );
        assert_eq!(ShellType::from_string("CMD").unwrap(), ShellType::Cmd);
    }

    #[test]
    fn test_from_string_invalid_shells() {
        for name in ["unknown", "csh", "tcsh", "", " ", "  bash  ", "bahs"] {
            assert!(ShellType::from_string(name).is_err(), "{name:?}");
        }
        let msg = ShellType::from_string("ksh").unwrap_err().to_string();
        assert!(msg.contains("ksh"));
        assert!(msg.contains("supported"));
    }

    #[test]
    fn test_display_parses_back() {
        for shell in [
            ShellType::Bash,
            ShellType::Zsh,
            ShellType::Fish,
            ShellType::PowerShell,
            ShellType::Cmd,
        ] {
            assert_eq!(ShellType::from_string(&shell.to_string()).unwrap(), shell);
        }
    }

    #[test]
    fn test_posix_export_quotes_spaces_and_quotes() {
        assert_eq!(
            ShellType::Bash.format_export("PATH", "/opt/My Tools/bin:/bin"),
            "export PATH='/opt/My Tools/bin:/bin'"
        );
        assert_eq!(
            ShellType::Zsh.format_export("PATH", "/opt/it's/bin"),
            r"export PATH='/opt/it'\''s/bin'"
        );
    }

    #[test]
    fn test_fish_export_escapes_backslashes() {
        assert_eq!(
            ShellType::Fish.format_export("PATH", r"/a\b:/c'd"),
            r"set -gx PATH '/a\\b:/c\'d'"
        );
    }

    #[test]
    fn test_powershell_export_doubles_quotes() {
        assert_eq!(
            ShellType::PowerShell.format_export("Path", r"C:\Program Files\O'Brien"),
            r"$env:Path = 'C:\Program Files\O''Brien'"
        );
    }

    #[test]
    fn test_cmd_export_wraps_assignment() {
        assert_eq!(
            ShellType::Cmd.format_export("Path", r"C:\Program Files (x86)\l\1;C:\Windows"),
            r#"set "Path=C:\Program Files (x86)\l\1;C:\Windows""#
        );
    }

    #[test]
    fn test_detect_precedence() {
        assert_eq!(
            ShellType::detect_from(lookup_in(&[("ZSH_VERSION", "5.9"), ("SHELL", "/bin/bash")])),
            ShellType::Zsh
        );
        assert_eq!(
            ShellType::detect_from(lookup_in(&[("FISH_VERSION", "3.7")])),
            ShellType::Fish
        );
        assert_eq!(
            ShellType::detect_from(lookup_in(&[("PSModulePath", r"C:\ps")])),
            ShellType::PowerShell
        );
        assert_eq!(
            ShellType::detect_from(lookup_in(&[("SHELL", "/usr/bin/fish")])),
            ShellType::Fish
        );
        assert_eq!(
            ShellType::detect_from(lookup_in(&[("SHELL", "/bin/dash")])),
            ShellType::Bash
        );
        assert_eq!(
            ShellType::detect_from(lookup_in(&[("ComSpec", r"C:\Windows\system32\cmd.exe")])),
            ShellType::Cmd
        );
        assert_eq!(ShellType::detect_from(lookup_in(&[])), ShellType::Bash);
    }
}
