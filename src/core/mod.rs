// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment access.
//!
//! ```text
//!         core
//!          |
//!     +----+-----+
//!     v          v
//!    env      process
//!     |          |
//!    Env      Builder
//!  snapshot   Output
//! ```

pub mod env;
pub mod process;
