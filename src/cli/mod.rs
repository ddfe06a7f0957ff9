// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for setenv-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! setenv [global options] <command>
//! generate [build options] [--shell csh|sh|all]
//! print    [build options] --shell csh|sh
//! list     [build options] [--json]
//! options
//! inis
//! version
//! ```

pub mod generate;
pub mod global;


use crate::cli::generate::{GenerateArgs, ListArgs, PrintArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Build Environment Script Generator
///
/// Writes the `setenv.csh` and `setenv.sh` scripts for a build tree.
#[derive(Debug, Parser)]
#[command(
    name = "setenv",
    author,
    version,
    about = "Build Environment Script Generator",
    long_about = "setenv-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Writes setenv.csh and setenv.sh into a build tree's install\n\
                  directory. Sourcing one of them puts the tree's binaries,\n\
                  libraries and plugins on the search paths together with the\n\
                  external packages (ROOT, Xerces, CCDB, ...) it was built against.\n\n\
                  Invoking `setenv generate` in a build tree writes both scripts.\n\
                  See `setenv <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  setenv reads `setenv.toml` from the current directory if it\n\
                  exists. Additional files can be given with --ini; later files\n\
                  override earlier ones. Any key can also be set through the\n\
                  environment as SETENV_<SECTION>__<KEY>, for example\n\
                  SETENV_BUILD__OS_NAME=Linux_RHEL9-x86_64-gcc11. Use\n\
                  --no-default-inis to skip `setenv.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by setenv.
    Inis,

    /// Writes the environment scripts into the install directory.
    Generate(GenerateArgs),

    /// Renders one script to stdout without writing it.
    Print(PrintArgs),

    /// Shows which subsystems a script would configure, and with what.
    List(ListArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
