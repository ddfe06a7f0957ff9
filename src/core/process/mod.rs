// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::which("uname")
//!   .arg("-a") .env() .capture_stdout()
//!   .run()
//!       --> tokio::process::Command::output()
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod runner;
