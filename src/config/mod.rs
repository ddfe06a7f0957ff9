// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for setenv-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. setenv.toml (cwd, optional)
//! 3. --ini files
//! 4. SETENV_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SETENV_GLOBAL__DRY=true              → global.dry = true
//! SETENV_BUILD__OS_NAME=Linux_RHEL9    → build.os_name = "Linux_RHEL9"
//! SETENV_DEFAULTS__ROOTSYS=/opt/root   → defaults.rootsys = "/opt/root"
//! ```
//!
//! # Example
//!
//! ```toml
//! [build]
//! halld_home = "/group/halld/Software/builds/sim-recon"
//! shells = ["sh"]
//!
//! [defaults]
//! rootsys = "/apps/root/6.30"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use types::{BuildConfig, DefaultsConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Build tree settings.
    pub build: BuildConfig,
    /// Fallback value overrides.
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use setenv_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("setenv.toml")
    ///     .with_env_prefix("SETENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display, one `key = value` per line,
    /// sorted by key. Defaults show their effective value.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_build_options(&mut options);
        self.format_defaults_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_ref()));
    }

    fn format_build_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "build.install_dir".into(),
            fmt_path(self.build.install_dir.as_ref()),
        );
        options.insert(
            "build.os_name".into(),
            self.build.os_name.clone().unwrap_or_default(),
        );
        options.insert(
            "build.halld_home".into(),
            fmt_path(self.build.halld_home.as_ref()),
        );
        let shells: Vec<String> = self.build.shells.iter().map(ToString::to_string).collect();
        options.insert("build.shells".into(), shells.join(", "));
    }

    fn format_defaults_options(&self, options: &mut BTreeMap<String, String>) {
        for (var, value) in self.defaults.resolve().iter() {
            options.insert(format!("defaults.{}", var.to_lowercase()), value.to_string());
        }
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
