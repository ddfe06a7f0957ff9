// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for setenv-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, BuildConfig, DefaultsConfig
//! BuildConfig.shells: ["csh", "sh"] (default both)
//! DefaultsConfig: per-variable fallback overrides
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::logging::{LogConfig, LogLevel};
use crate::setenv::build::BuildOptions;
use crate::setenv::shell::{Shell, Shells};
use crate::setenv::table::Defaults;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Render scripts without writing them.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

impl GlobalConfig {
    /// Logging setup for these options. Console lines carry timestamps and
    /// targets only from debug level up.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let verbose = self.output_log_level.as_u8() >= LogLevel::DEBUG.as_u8();
        LogConfig::builder()
            .with_console_level(self.output_log_level)
            .with_file_level(self.file_log_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .with_show_timestamps(verbose)
            .with_show_target(verbose)
            .build()
    }
}

/// Build tree settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory the scripts are written to (default: `halld_home/os_name`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,
    /// OS-family tag (default: `$BMS_OSNAME`, then derived from the host).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    /// Source tree root (default: parent of `install_dir`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halld_home: Option<PathBuf>,
    /// Dialects to generate; must name at least one.
    #[serde(deserialize_with = "non_empty_shells")]
    pub shells: Vec<Shell>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            os_name: None,
            halld_home: None,
            shells: vec![Shell::Csh, Shell::Sh],
        }
    }
}

impl BuildConfig {
    #[must_use]
    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            install_dir: self.install_dir.clone(),
            os_name: self.os_name.clone(),
            halld_home: self.halld_home.clone(),
        }
    }

    #[must_use]
    pub fn shells(&self) -> Shells {
        self.shells.iter().copied().collect()
    }
}

fn non_empty_shells<'de, D>(deserializer: D) -> std::result::Result<Vec<Shell>, D::Error>
where
    D: Deserializer<'de>,
{
    let shells = Vec::<Shell>::deserialize(deserializer)?;
    if shells.is_empty() {
        return Err(serde::de::Error::custom(
            "build.shells must name at least one of 'csh', 'sh'",
        ));
    }
    Ok(shells)
}

/// Overrides for the values used when a variable is not in the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdds_home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jana_home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jana_calib_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccdb_home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rcdb_connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rootsys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cern_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xercescroot: Option<String>,
}

impl DefaultsConfig {
    /// Variable name and configured override, for every set field.
    #[must_use]
    pub fn overrides(&self) -> Vec<(&'static str, &str)> {
        [
            ("HDDS_HOME", &self.hdds_home),
            ("JANA_HOME", &self.jana_home),
            ("JANA_CALIB_URL", &self.jana_calib_url),
            ("CCDB_HOME", &self.ccdb_home),
            ("RCDB_CONNECTION", &self.rcdb_connection),
            ("ROOTSYS", &self.rootsys),
            ("CERN_LEVEL", &self.cern_level),
            ("XERCESCROOT", &self.xercescroot),
        ]
        .into_iter()
        .filter_map(|(var, value)| value.as_deref().map(|v| (var, v)))
        .collect()
    }

    /// The built-in defaults with these overrides applied.
    #[must_use]
    pub fn resolve(&self) -> Defaults {
        self.overrides()
            .into_iter()
            .fold(Defaults::builtin(), |defaults, (var, value)| {
                defaults.with(var, value)
            })
    }
}
