// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          generate / print / list
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + SETENV_*, layered |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |          setenv           |
//!              |  table -> render -> write |
//!              |  shell, header, platform  |
//!              '---------------------------'
//!
//!   +-----------------------------------------+
//!   |  core   process (uname), env snapshot   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod setenv;
