// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable snapshots.
//!
//! # Architecture
//!
//! ```text
//! Env (shared BTreeMap<String, String>)
//! Sources: current_env(), Env::from_map(), Env::from_iter()
//! Ops: get/contains/get_or/set/remove
//! ```
//!
//! Script generation never reads `std::env` directly: callers capture a
//! snapshot once and pass it down, so rendering stays a pure function.

pub mod container;


/// Captures the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[must_use]
pub fn current_env() -> container::Env {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
