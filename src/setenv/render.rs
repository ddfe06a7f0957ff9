// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script rendering.
//!
//! ```text
//! render(shell, ctx)
//!   header (shebang, provenance comments)
//!   ensure LD_LIBRARY_PATH / DYLD_LIBRARY_PATH and PYTHONPATH exist
//!   for subsystem in SUBSYSTEMS where gate is open:
//!       # label
//!       steps, in the shell's syntax
//! ```
//!
//! Rendering reads nothing outside its arguments.

use std::fmt::Write as _;

use super::build::BuildEnv;
use super::header::Header;
use super::platform::MODULE_SEARCH_PATH;
use super::shell::{Shell, escape, quote};
use super::table::{Defaults, Lookup, SUBSYSTEMS, Step, Subsystem, Value, ValueSource};
use crate::core::env::container::Env;

/// Everything a script is rendered from.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    pub header: Header,
    pub build: BuildEnv,
    pub env: Env,
    pub defaults: Defaults,
}

impl ScriptContext {
    #[must_use]
    pub fn lookup(&self) -> Lookup<'_> {
        Lookup {
            env: &self.env,
            defaults: &self.defaults,
            build: &self.build,
        }
    }
}

/// Renders the complete script for `shell`.
#[must_use]
pub fn render(shell: Shell, ctx: &ScriptContext) -> String {
    let mut out = ctx.header.render(shell.shebang());

    let ldlpv = ctx.build.library_path_var();
    for var in [ldlpv, MODULE_SEARCH_PATH] {
        let _ = writeln!(out, "# Make sure {var} is set");
        let _ = writeln!(out, "{}\n", shell.ensure_defined(var));
    }

    let lookup = ctx.lookup();
    for subsystem in SUBSYSTEMS {
        if subsystem.gate.is_open(&ctx.env) {
            out.push_str(&render_block(shell, subsystem, &lookup));
        }
    }

    out
}

/// Renders one subsystem block, ending with a blank line.
///
/// A `Set` whose value cannot be resolved is left out rather than written
/// as an empty assignment. Environment values and build paths are written
/// literally; literals and defaults keep their `$VAR` references.
#[must_use]
pub fn render_block(shell: Shell, subsystem: &Subsystem, lookup: &Lookup<'_>) -> String {
    let os_name = lookup.build.os_name();
    let mut out = format!("# {}\n", subsystem.label);

    for step in subsystem.steps {
        let line = match *step {
            Step::Set(var, value) => word(lookup, value).map(|word| shell.set(var, &word)),
            Step::SetGuarded { guard, var, value } => {
                word(lookup, value).map(|word| shell.set_guarded(guard, var, &word))
            }
            Step::Prepend(list, dir) => Some(shell.prepend(list.var_name(os_name), dir)),
            Step::Source { csh, sh } => Some(shell.source_if_exists(match shell {
                Shell::Csh => csh,
                Shell::Sh => sh,
            })),
        };
        if let Some(line) = line {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push('\n');
    out
}

/// The shell word for `value`, or `None` when it cannot be resolved.
fn word(lookup: &Lookup<'_>, value: Value) -> Option<String> {
    let (text, source) = lookup.resolve(value)?;
    Some(match (value, source) {
        (Value::Literal(_), _) | (_, ValueSource::Default) => quote(&text),
        _ => escape(&text),
    })
}
