// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate, print and list command arguments.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::setenv::build::BuildOptions;
use crate::setenv::shell::{Shell, Shells};

/// Build tree options shared by every command that renders a script.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Directory the scripts are written to (default: `<halld-home>/<osname>`).
    #[arg(long = "install-dir", value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// OS-family tag (default: `$BMS_OSNAME`, then derived from the host).
    #[arg(long = "osname", value_name = "TAG")]
    pub os_name: Option<String>,

    /// Source tree root (default: parent of the install directory).
    #[arg(long = "halld-home", value_name = "DIR")]
    pub halld_home: Option<PathBuf>,
}

impl BuildArgs {
    #[must_use]
    pub fn options(&self) -> BuildOptions {
        BuildOptions::builder()
            .maybe_with_install_dir(self.install_dir.clone())
            .maybe_with_os_name(self.os_name.clone())
            .maybe_with_halld_home(self.halld_home.clone())
            .build()
    }
}

/// Script dialects selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellArg {
    Csh,
    Sh,
    /// Both `setenv.csh` and `setenv.sh`.
    All,
}

impl From<ShellArg> for Shells {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Csh => Self::CSH,
            ShellArg::Sh => Self::SH,
            ShellArg::All => Self::all(),
        }
    }
}

/// A single script dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Csh,
    Sh,
}

impl From<DialectArg> for Shell {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Csh => Self::Csh,
            DialectArg::Sh => Self::Sh,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Dialects to write (default: from configuration, both if unset).
    #[arg(long, value_enum, value_name = "SHELL")]
    pub shell: Option<ShellArg>,
}

#[derive(Debug, Clone, Args)]
pub struct PrintArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Dialect to render.
    #[arg(long, value_enum, value_name = "SHELL", default_value = "sh")]
    pub shell: DialectArg,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Print the status as JSON.
    #[arg(long)]
    pub json: bool,
}
