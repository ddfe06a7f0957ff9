// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build environment: where scripts go and which platform they describe.
//!
//! ```text
//! BuildOptions (CLI > config)     Env snapshot        cwd
//!        \                            |               /
//!         +-------- resolve() --------+--------------+
//!                      |
//!                      v
//! BuildEnv { install_dir, os_name, halld_home }
//!
//! os_name     option > $BMS_OSNAME > default_os_name()
//! halld_home  option > parent(install_dir) > $HALLD_HOME > parent(cwd)
//! install_dir option > halld_home/os_name
//!
//! relative paths are joined onto cwd and normalized
//! ```

use bon::Builder;
use std::path::{Component, Path, PathBuf};

use super::platform::{default_os_name, library_path_var};
use crate::core::env::container::Env;

/// The resolved build environment scripts are generated for.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct BuildEnv {
    /// Directory the scripts are written to.
    #[builder(into)]
    install_dir: PathBuf,
    /// OS-family tag, e.g. `Linux_RHEL9-x86_64-gcc11.4.1`.
    #[builder(into)]
    os_name: String,
    /// Root of the source tree; binaries live under `halld_home/os_name`.
    #[builder(into)]
    halld_home: PathBuf,
}

impl BuildEnv {
    #[must_use]
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    #[must_use]
    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    #[must_use]
    pub fn halld_home(&self) -> &Path {
        &self.halld_home
    }

    /// The dynamic-library-path variable for this build's platform.
    #[must_use]
    pub fn library_path_var(&self) -> &'static str {
        library_path_var(&self.os_name)
    }
}

/// Partially specified build settings, merged from CLI and configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct BuildOptions {
    #[builder(setters(name = with_install_dir))]
    pub install_dir: Option<PathBuf>,
    #[builder(setters(name = with_os_name))]
    pub os_name: Option<String>,
    #[builder(setters(name = with_halld_home))]
    pub halld_home: Option<PathBuf>,
}

impl BuildOptions {
    /// Fills unset fields from `fallback`; fields set here win.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            install_dir: self.install_dir.or(fallback.install_dir),
            os_name: self.os_name.or(fallback.os_name),
            halld_home: self.halld_home.or(fallback.halld_home),
        }
    }

    /// Resolves the remaining gaps from the environment snapshot and the
    /// working directory.
    #[must_use]
    pub fn resolve(self, env: &Env, cwd: &Path) -> BuildEnv {
        let os_name = self
            .os_name
            .or_else(|| env.get("BMS_OSNAME").map(str::to_string))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(default_os_name);

        let install_dir = self.install_dir.map(|dir| absolute(&dir, cwd));

        let halld_home = self
            .halld_home
            .map(|home| absolute(&home, cwd))
            .or_else(|| {
                install_dir
                    .as_deref()
                    .and_then(Path::parent)
                    .map(Path::to_path_buf)
            })
            .or_else(|| {
                env.get("HALLD_HOME")
                    .filter(|home| !home.is_empty())
                    .map(|home| absolute(Path::new(home), cwd))
            })
            .unwrap_or_else(|| {
                let cwd = absolute(cwd, Path::new("/"));
                cwd.parent().map_or_else(|| cwd.clone(), Path::to_path_buf)
            });

        let install_dir = install_dir.unwrap_or_else(|| halld_home.join(&os_name));

        BuildEnv {
            install_dir,
            os_name,
            halld_home,
        }
    }
}

/// `path` joined onto `base` when relative, with `.` and `..` folded away.
fn absolute(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normal = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }
    normal
}
