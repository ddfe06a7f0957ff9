// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment script generation.
//!
//! ```text
//! SetenvRequest { build, env, defaults, shells, dry }
//!        |
//!        v
//! Header::collect()  (time, $USER, $HOST, uname -a)
//!        |
//!        v
//! for shell in shells:            csh, then sh
//!     render(shell, ctx)  -->  write_script(install_dir, shell)
//!                              mkdir -p, write, chmod 0755
//! ```
//!
//! The scripts are sourced by users to pick up the binaries, libraries and
//! plugins installed under `<halld_home>/<os_name>` together with the
//! external packages (ROOT, Xerces, CCDB, ...) they were built against.

pub mod build;
pub mod header;
pub mod platform;
pub mod render;
pub mod shell;
pub mod table;
pub mod writer;

#[cfg(test)]
mod tests;

use bon::Builder;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::env::container::Env;
use crate::error::Result;

use build::BuildEnv;
use header::Header;
use render::{ScriptContext, render};
use shell::{Shell, Shells};
use table::Defaults;

/// A request to generate one or more scripts.
#[derive(Debug, Clone, Builder)]
pub struct SetenvRequest {
    #[builder(setters(name = with_build))]
    build: BuildEnv,
    #[builder(setters(name = with_env))]
    env: Env,
    #[builder(setters(name = with_defaults), default)]
    defaults: Defaults,
    #[builder(setters(name = with_shells), default)]
    shells: Shells,
    /// Log what would be written without touching the filesystem.
    #[builder(setters(name = with_dry), default = false)]
    dry: bool,
}

impl SetenvRequest {
    #[must_use]
    pub const fn build_env(&self) -> &BuildEnv {
        &self.build
    }

    #[must_use]
    pub const fn shells(&self) -> Shells {
        self.shells
    }

    /// Context for rendering with `header`.
    #[must_use]
    pub fn context(&self, header: Header) -> ScriptContext {
        ScriptContext {
            header,
            build: self.build.clone(),
            env: self.env.clone(),
            defaults: self.defaults.clone(),
        }
    }

    /// Collects a fresh header and renders the script for `shell`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform string cannot be queried.
    pub async fn render(&self, shell: Shell) -> Result<String> {
        let header = Header::collect(&self.env, self.build.os_name()).await?;
        Ok(render(shell, &self.context(header)))
    }
}

/// Generates every requested script into the install directory.
///
/// Returns the paths written (or that would be written, in dry mode), in
/// generation order.
///
/// # Errors
///
/// Returns an error if the platform query fails, the install directory
/// cannot be created, or a script cannot be written or made executable.
pub async fn generate(request: &SetenvRequest) -> Result<Vec<PathBuf>> {
    let dir = request.build.install_dir();
    debug!(
        install_dir = %dir.display(),
        os_name = request.build.os_name(),
        halld_home = %request.build.halld_home().display(),
        library_path = request.build.library_path_var(),
        "build environment"
    );

    let header = Header::collect(&request.env, request.build.os_name()).await?;
    let ctx = request.context(header);

    let mut written = Vec::new();
    for shell in request.shells.dialects() {
        info!("Making {} in {}", shell.file_name(), dir.display());
        let content = render(shell, &ctx);

        let path = if request.dry {
            info!(bytes = content.len(), "dry run, not writing");
            dir.join(shell.file_name())
        } else {
            writer::write_script(dir, shell, &content)?
        };
        written.push(path);
    }

    Ok(written)
}

/// Generates `setenv.csh` only.
///
/// # Errors
///
/// See [`generate`].
pub async fn mk_setenv_csh(build: BuildEnv, env: Env) -> Result<PathBuf> {
    generate_one(build, env, Shell::Csh).await
}

/// Generates `setenv.sh` only.
///
/// # Errors
///
/// See [`generate`].
pub async fn mk_setenv_sh(build: BuildEnv, env: Env) -> Result<PathBuf> {
    generate_one(build, env, Shell::Sh).await
}

async fn generate_one(build: BuildEnv, env: Env, shell: Shell) -> Result<PathBuf> {
    let request = SetenvRequest::builder()
        .with_build(build)
        .with_env(env)
        .with_shells(shell.into())
        .build();
    generate(&request)
        .await?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("no script generated for {shell}"))
}
