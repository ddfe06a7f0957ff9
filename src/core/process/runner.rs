// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()  args, env, stdio
//!   |
//!   v
//! output().await
//!   |
//!   v
//! validate exit_code
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{ProcessError, Result};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging).
    fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(env) = self.environment() {
            command.env_clear().envs(env.iter());
        }

        let stdout = if self.captures_stdout() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        command
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status.
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        debug!(cmd = %cmd_line, "exec");

        let raw = self
            .build_command()
            .output()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let output = ProcessOutput::new(
            raw.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&raw.stdout).into_owned(),
            String::from_utf8_lossy(&raw.stderr).into_owned(),
        );
        trace!(process = %name, code = output.exit_code(), "exited");

        if !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr().trim_end(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            }
            .into());
        }

        Ok(output)
    }
}
