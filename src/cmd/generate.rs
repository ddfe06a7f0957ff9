// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate and print commands.
//!
//! ```text
//! --install-dir / --osname / --halld-home   (CLI)
//!        | or
//! [build] install_dir / os_name / halld_home (config)
//!        | resolve
//! BMS_OSNAME, HALLD_HOME, cwd                (environment)
//!        v
//!     BuildEnv --> SetenvRequest --> generate() / render()
//! ```

use anyhow::Context;
use tracing::info;

use crate::cli::generate::{BuildArgs, GenerateArgs, PrintArgs};
use crate::config::Config;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::error::Result;
use crate::setenv::build::BuildEnv;
use crate::setenv::shell::{Shell, Shells};
use crate::setenv::{SetenvRequest, generate};

/// Resolves the build environment from CLI flags, then configuration, then
/// the environment snapshot.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_build_env(args: &BuildArgs, config: &Config, env: &Env) -> Result<BuildEnv> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    Ok(args.options().or(config.build.options()).resolve(env, &cwd))
}

/// Builds the request for `shells` from the current process environment.
///
/// # Errors
///
/// Returns an error if the build environment cannot be resolved.
pub fn build_request(
    args: &BuildArgs,
    config: &Config,
    shells: Shells,
    dry: bool,
) -> Result<SetenvRequest> {
    let env = current_env();
    let build = resolve_build_env(args, config, &env)?;
    Ok(SetenvRequest::builder()
        .with_build(build)
        .with_env(env)
        .with_defaults(config.defaults.resolve())
        .with_shells(shells)
        .with_dry(dry)
        .build())
}

/// Main handler for the generate command.
///
/// # Errors
///
/// Returns an error if the platform query fails or a script cannot be written.
pub async fn run_generate_command(args: &GenerateArgs, config: &Config, dry: bool) -> Result<()> {
    let shells = args.shell.map_or_else(|| config.build.shells(), Shells::from);
    let request = build_request(&args.build, config, shells, dry || config.global.dry)?;

    let written = generate(&request).await?;
    for path in &written {
        if dry || config.global.dry {
            info!("[dry] would write {}", path.display());
        } else {
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// Main handler for the print command.
///
/// # Errors
///
/// Returns an error if the platform query fails.
pub async fn run_print_command(args: &PrintArgs, config: &Config) -> Result<()> {
    let shell: Shell = args.shell.into();
    let request = build_request(&args.build, config, Shells::from(shell), true)?;
    print!("{}", request.render(shell).await?);
    Ok(())
}
