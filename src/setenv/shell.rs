// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shell dialects and their statement syntax.
//!
//! ```text
//!                 Csh                         Sh
//! set        setenv V value              export V=value
//! guarded    if ( $?G ) then ... endif   [ ! -z "$G" ] && export V=value
//! prepend    setenv V dir:${V}           export V=dir:${V}
//! ensure     if ( ! $?V ) then ...       if [ -z "$V" ]; then ...
//! source     if ( -e P ) then source P   if [ -e P ]; then . P
//! ```
//!
//! Values reach these statements as shell words: [`escape`] for text taken
//! as-is (environment values, paths), [`quote`] for text whose `$VAR`
//! references must expand when the script is sourced.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// A shell dialect the scripts can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    /// C shell family (`csh`, `tcsh`).
    Csh,
    /// Bourne shell family (`sh`, `bash`, `zsh`).
    Sh,
}

impl Shell {
    /// Name of the generated script.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csh => "setenv.csh",
            Self::Sh => "setenv.sh",
        }
    }

    #[must_use]
    pub const fn shebang(self) -> &'static str {
        match self {
            Self::Csh => "#!/bin/tcsh",
            Self::Sh => "#!/bin/bash",
        }
    }

    /// Statement assigning the shell word `word` to `var`.
    #[must_use]
    pub fn set(self, var: &str, word: &str) -> String {
        match self {
            Self::Csh => format!("setenv {var} {word}"),
            Self::Sh => format!("export {var}={word}"),
        }
    }

    /// Assignment that only runs when `guard` is set. The csh form is a
    /// block so `word` is not expanded while `guard` is unset.
    #[must_use]
    pub fn set_guarded(self, guard: &str, var: &str, word: &str) -> String {
        match self {
            Self::Csh => format!(
                "if ( $?{guard} ) then\n   {}\nendif",
                self.set(var, word)
            ),
            Self::Sh => format!("[ ! -z \"${guard}\" ] && {}", self.set(var, word)),
        }
    }

    /// Statement putting `dir` in front of the colon-separated list `var`.
    #[must_use]
    pub fn prepend(self, var: &str, dir: &str) -> String {
        self.set(var, &quote(&format!("{dir}:${{{var}}}")))
    }

    /// Block defining `var` as empty when it is not already set, so later
    /// prepends never reference an undefined variable.
    #[must_use]
    pub fn ensure_defined(self, var: &str) -> String {
        match self {
            Self::Csh => format!("if ( ! $?{var} ) then\n   setenv {var}\nendif"),
            Self::Sh => format!("if [ -z \"${var}\" ]; then\n   export {var}=\"\"\nfi"),
        }
    }

    /// Block sourcing `path` only when it exists at source time.
    #[must_use]
    pub fn source_if_exists(self, path: &str) -> String {
        let path = quote(path);
        match self {
            Self::Csh => format!("if ( -e {path} ) then\n  source {path}\nendif"),
            Self::Sh => format!("if [ -e {path} ]; then\n  . {path}\nfi"),
        }
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csh => write!(f, "csh"),
            Self::Sh => write!(f, "sh"),
        }
    }
}

impl std::str::FromStr for Shell {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csh" | "tcsh" => Ok(Self::Csh),
            "sh" | "bash" => Ok(Self::Sh),
            _ => Err(ConfigError::InvalidValue {
                section: "build".to_string(),
                key: "shells".to_string(),
                message: format!("expected 'csh' or 'sh', got '{s}'"),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Shell {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

bitflags! {
    /// A set of dialects to generate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Shells: u8 {
        const CSH = 0x01;
        const SH = 0x02;
    }
}

impl Default for Shells {
    fn default() -> Self {
        Self::all()
    }
}

impl Shells {
    /// Dialects in generation order (csh first).
    pub fn dialects(self) -> impl Iterator<Item = Shell> {
        [(Self::CSH, Shell::Csh), (Self::SH, Shell::Sh)]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, shell)| shell)
    }
}

impl From<Shell> for Shells {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Csh => Self::CSH,
            Shell::Sh => Self::SH,
        }
    }
}

impl FromIterator<Shell> for Shells {
    fn from_iter<I: IntoIterator<Item = Shell>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, shell| acc | Self::from(shell))
    }
}

/// Characters that need no quoting in either dialect.
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || "/._-+:,@%=".contains(c)
}

/// `value` as a word the shell takes literally.
///
/// Anything beyond plain path characters is single-quoted, with embedded
/// `'` written as `'\''`.
#[must_use]
pub fn escape(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_plain) {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// `value` as a word in which `$VAR` and `${VAR}` still expand.
///
/// Values needing quotes are wrapped in double quotes. Characters that are
/// special inside double quotes in either dialect (`"`, `` ` ``, `\`, `!`)
/// are written as a single-quoted piece between two double-quoted runs.
#[must_use]
pub fn quote(value: &str) -> String {
    if value.chars().all(|c| is_plain(c) || "${}".contains(c)) {
        return value.to_string();
    }

    let mut word = String::with_capacity(value.len() + 2);
    word.push('"');
    for c in value.chars() {
        if "\"`\\!".contains(c) {
            word.push_str("\"'");
            word.push(c);
            word.push_str("'\"");
        } else {
            word.push(c);
        }
    }
    word.push('"');
    word
}
