// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provenance header written at the top of every script.

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone};
use tracing::trace;

use crate::core::env::container::Env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// Placeholder for user and host when the snapshot does not name them.
pub const UNKNOWN: &str = "Unknown";

/// Format of the generation date line, e.g. `03:42PM on October 16, 2026`.
pub const DATE_FORMAT: &str = "%I:%M%p on %B %d, %Y";

/// Who generated a script, where, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub generated_at: String,
    pub user: String,
    pub host: String,
    pub platform: String,
    pub os_name: String,
}

impl Header {
    /// Builds a header from already-known parts; `user` and `host` come from
    /// `USER` and `HOST` (or `HOSTNAME`) in the snapshot.
    #[must_use]
    pub fn from_parts<Tz: TimeZone>(
        now: &DateTime<Tz>,
        env: &Env,
        platform: impl Into<String>,
        os_name: impl Into<String>,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let platform: String = platform.into();
        let os_name: String = os_name.into();
        Self {
            generated_at: now.format(DATE_FORMAT).to_string(),
            user: comment_safe(env.get_or("USER", UNKNOWN)),
            host: comment_safe(
                env.get("HOST")
                    .or_else(|| env.get("HOSTNAME"))
                    .unwrap_or(UNKNOWN),
            ),
            platform: comment_safe(&platform),
            os_name: comment_safe(&os_name),
        }
    }

    /// Collects a header for now, running `uname -a` for the platform line.
    ///
    /// # Errors
    ///
    /// Returns an error if `uname` cannot be found or exits unsuccessfully.
    pub async fn collect(env: &Env, os_name: &str) -> Result<Self> {
        let platform = uname(env).await?;
        Ok(Self::from_parts(&Local::now(), env, platform, os_name))
    }

    /// Comment lines for `shebang`, followed by two blank lines.
    #[must_use]
    pub fn render(&self, shebang: &str) -> String {
        format!(
            "{shebang}\n\
             #\n\
             # This file was generated by setenv-rs (see `setenv generate --help`)\n\
             #\n\
             # Generation date: {}\n\
             #\n\
             #       User: {}\n\
             #       Host: {}\n\
             #   platform: {}\n\
             # BMS_OSNAME: {}\n\
             \n\
             \n",
            self.generated_at, self.user, self.host, self.platform, self.os_name
        )
    }
}

/// Replaces control characters so `text` stays inside its `#` comment line.
fn comment_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Output of `uname -a` run with the snapshot as its environment, trimmed
/// to one line.
///
/// # Errors
///
/// Returns an error if `uname` is not in PATH or fails.
pub async fn uname(env: &Env) -> Result<String> {
    let output = ProcessBuilder::which("uname")?
        .arg("-a")
        .env(env.clone())
        .capture_stdout()
        .run()
        .await
        .context("failed to query platform with `uname -a`")?;
    let platform = output.stdout().trim().to_string();
    trace!(%platform, "uname");
    Ok(platform)
}
