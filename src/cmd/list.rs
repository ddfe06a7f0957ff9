// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for setenv-rs.

use crate::cli::generate::ListArgs;
use crate::cmd::generate::resolve_build_env;
use crate::config::Config;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::error::Result;
use crate::setenv::build::BuildEnv;
use crate::setenv::table::{Defaults, Lookup, SubsystemStatus, ValueSource, status};

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the build environment cannot be resolved or the
/// status cannot be serialized.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let env = current_env();
    let build = resolve_build_env(&args.build, config, &env)?;
    let defaults = config.defaults.resolve();

    let rows = collect_status(&env, &defaults, &build);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("install_dir = {}", build.install_dir().display());
        println!("os_name     = {}", build.os_name());
        println!("halld_home  = {}", build.halld_home().display());
        println!();
        for line in format_status(&rows) {
            println!("{line}");
        }
    }
    Ok(())
}

#[must_use]
pub fn collect_status(env: &Env, defaults: &Defaults, build: &BuildEnv) -> Vec<SubsystemStatus> {
    status(&Lookup {
        env,
        defaults,
        build,
    })
}

/// One aligned line per subsystem: `label  variable  value (source)`.
#[must_use]
pub fn format_status(rows: &[SubsystemStatus]) -> Vec<String> {
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    let var_width = rows
        .iter()
        .map(|r| r.variable.map_or(1, str::len))
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| {
            let marker = if row.emitted { '+' } else { '-' };
            let variable = row.variable.unwrap_or("-");
            let detail = match (&row.value, row.source) {
                (Some(value), source) => format!("{value} ({source})"),
                (None, ValueSource::Absent) if !row.emitted => "skipped".to_string(),
                (None, source) => format!("({source})"),
            };
            format!(
                "{marker} {:<label_width$}  {variable:<var_width$}  {detail}",
                row.label
            )
        })
        .collect()
}
