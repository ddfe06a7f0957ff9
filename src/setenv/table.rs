// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative table of the software the scripts set up.
//!
//! ```text
//! Subsystem { label, gate, steps }
//!   gate   Always | WhenSet(VAR)
//!   steps  Set(VAR, Value) | SetGuarded | Prepend(PathList, dir) | Source
//!   Value  Var (snapshot -> defaults) | Literal | OsName | HalldHome
//!
//! CLANG HDDS JANA HALLD CCDB RCDB ROOT CERNLIB Java Xerces EVIO ET
//! ```
//!
//! The table is dialect-independent; `render` walks it once per shell.

use serde::Serialize;
use std::collections::BTreeMap;

use super::build::BuildEnv;
use super::platform::{MODULE_SEARCH_PATH, library_path_var};
use crate::core::env::container::Env;

/// Fallback values for variables the build tree always configures.
pub const BUILTIN_DEFAULTS: &[(&str, &str)] = &[
    ("HDDS_HOME", "$HOME/hdds"),
    ("JANA_HOME", "$HOME/jana"),
    ("JANA_CALIB_URL", "$HOME/halld/calib"),
    ("CCDB_HOME", "$HOME/ccdb"),
    ("RCDB_CONNECTION", "mysql://rcdb@hallddb.jlab.org/rcdb"),
    ("ROOTSYS", "$HOME/root"),
    ("CERN_LEVEL", "2006"),
    ("XERCESCROOT", "$HOME/xerces"),
];

/// Where a value written to the script comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// The variable's value in the snapshot, else its default.
    Var(&'static str),
    /// Fixed text, usually referencing variables set earlier in the script.
    Literal(&'static str),
    /// The build's OS-family tag.
    OsName,
    /// The root of the source tree.
    HalldHome,
}

/// A colon-separated search list that blocks prepend to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathList {
    /// `PATH`
    Bin,
    /// `LD_LIBRARY_PATH` or `DYLD_LIBRARY_PATH`, by OS tag.
    Library,
    /// `PYTHONPATH`
    Module,
    /// Any other list, e.g. `JANA_PLUGIN_PATH`.
    Named(&'static str),
}

impl PathList {
    /// Variable name for this list on the given OS tag.
    #[must_use]
    pub fn var_name(self, os_name: &str) -> &'static str {
        match self {
            Self::Bin => "PATH",
            Self::Library => library_path_var(os_name),
            Self::Module => MODULE_SEARCH_PATH,
            Self::Named(name) => name,
        }
    }
}

/// One statement of a subsystem block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Set(&'static str, Value),
    SetGuarded {
        guard: &'static str,
        var: &'static str,
        value: Value,
    },
    Prepend(PathList, &'static str),
    /// Source a per-dialect script if it exists when ours is sourced.
    Source {
        csh: &'static str,
        sh: &'static str,
    },
}

/// Condition for emitting a subsystem block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Emitted only when the variable is present in the snapshot.
    WhenSet(&'static str),
}

impl Gate {
    #[must_use]
    pub fn is_open(self, env: &Env) -> bool {
        match self {
            Self::Always => true,
            Self::WhenSet(var) => env.contains(var),
        }
    }
}

/// A package whose environment the scripts configure.
#[derive(Debug, Clone, Copy)]
pub struct Subsystem {
    /// Rendered as the `# label` comment above the block.
    pub label: &'static str,
    pub gate: Gate,
    pub steps: &'static [Step],
}

impl Subsystem {
    /// The variable identifying this subsystem: the gate variable, or the
    /// first one the block sets.
    #[must_use]
    pub fn primary_var(&self) -> Option<&'static str> {
        match self.gate {
            Gate::WhenSet(var) => Some(var),
            Gate::Always => self.steps.iter().find_map(|step| match step {
                Step::Set(var, _) => Some(*var),
                _ => None,
            }),
        }
    }

    fn primary_value(&self) -> Option<Value> {
        let var = self.primary_var()?;
        self.steps
            .iter()
            .find_map(|step| match step {
                Step::Set(v, value) if *v == var => Some(*value),
                _ => None,
            })
            .or(Some(Value::Var(var)))
    }
}

/// All subsystems, in script order.
pub static SUBSYSTEMS: &[Subsystem] = &[
    Subsystem {
        label: "CLANG-LLVM C++ compiler",
        gate: Gate::WhenSet("CLANGROOT"),
        steps: &[
            Step::Set("CLANGROOT", Value::Var("CLANGROOT")),
            Step::Source {
                csh: "${CLANGROOT}/setenv.csh",
                sh: "${CLANGROOT}/setenv.sh",
            },
        ],
    },
    Subsystem {
        label: "HDDS",
        gate: Gate::Always,
        steps: &[Step::Set("HDDS_HOME", Value::Var("HDDS_HOME"))],
    },
    Subsystem {
        label: "JANA",
        gate: Gate::Always,
        steps: &[
            Step::Set("JANA_HOME", Value::Var("JANA_HOME")),
            Step::Set("JANA_CALIB_URL", Value::Var("JANA_CALIB_URL")),
            Step::SetGuarded {
                guard: "HDDS_HOME",
                var: "JANA_GEOMETRY_URL",
                value: Value::Literal("xmlfile://${HDDS_HOME}/main_HDDS.xml"),
            },
            Step::Set(
                "JANA_PLUGIN_PATH",
                Value::Literal("${JANA_HOME}/plugins:${JANA_HOME}/lib"),
            ),
            Step::Prepend(PathList::Bin, "${JANA_HOME}/bin"),
        ],
    },
    Subsystem {
        label: "HALLD",
        gate: Gate::Always,
        steps: &[
            Step::Set("HALLD_HOME", Value::HalldHome),
            Step::Set("BMS_OSNAME", Value::OsName),
            Step::Prepend(PathList::Bin, "${HALLD_HOME}/${BMS_OSNAME}/bin"),
            Step::Prepend(
                PathList::Named("JANA_PLUGIN_PATH"),
                "${HALLD_HOME}/${BMS_OSNAME}/plugins",
            ),
            Step::Prepend(PathList::Library, "${HALLD_HOME}/${BMS_OSNAME}/lib"),
            Step::Prepend(PathList::Module, "${HALLD_HOME}/${BMS_OSNAME}/lib/python"),
        ],
    },
    Subsystem {
        label: "CCDB",
        gate: Gate::WhenSet("CCDB_HOME"),
        steps: &[
            Step::Set("CCDB_HOME", Value::Var("CCDB_HOME")),
            Step::Source {
                csh: "$CCDB_HOME/environment.csh",
                sh: "$CCDB_HOME/environment.bash",
            },
            Step::Set("CCDB_CONNECTION", Value::Literal("${JANA_CALIB_URL}")),
        ],
    },
    Subsystem {
        label: "RCDB",
        gate: Gate::WhenSet("RCDB_HOME"),
        steps: &[
            Step::Set("RCDB_HOME", Value::Var("RCDB_HOME")),
            Step::Source {
                csh: "$RCDB_HOME/environment.csh",
                sh: "$RCDB_HOME/environment.bash",
            },
            Step::Set("RCDB_CONNECTION", Value::Var("RCDB_CONNECTION")),
            Step::Prepend(PathList::Library, "${RCDB_HOME}/cpp/lib"),
            Step::Prepend(PathList::Module, "${RCDB_HOME}/python"),
            Step::Prepend(PathList::Bin, "${RCDB_HOME}/bin:${RCDB_HOME}/cpp/bin"),
        ],
    },
    Subsystem {
        label: "ROOT",
        gate: Gate::Always,
        steps: &[
            Step::Set("ROOTSYS", Value::Var("ROOTSYS")),
            Step::Prepend(PathList::Bin, "${ROOTSYS}/bin"),
            Step::Prepend(PathList::Library, "${ROOTSYS}/lib"),
        ],
    },
    Subsystem {
        label: "CERNLIB",
        gate: Gate::WhenSet("CERN"),
        steps: &[
            Step::Set("CERN", Value::Var("CERN")),
            Step::Set("CERN_LEVEL", Value::Var("CERN_LEVEL")),
            Step::Prepend(PathList::Bin, "${CERN}/${CERN_LEVEL}/bin"),
            Step::Prepend(PathList::Library, "${CERN}/${CERN_LEVEL}/lib"),
        ],
    },
    Subsystem {
        label: "Java",
        gate: Gate::WhenSet("JAVAROOT"),
        steps: &[Step::Set("JAVAROOT", Value::Var("JAVAROOT"))],
    },
    Subsystem {
        label: "Xerces",
        gate: Gate::Always,
        steps: &[
            Step::Set("XERCESCROOT", Value::Var("XERCESCROOT")),
            Step::Prepend(PathList::Bin, "${XERCESCROOT}/bin"),
            Step::Prepend(PathList::Library, "${XERCESCROOT}/lib"),
        ],
    },
    Subsystem {
        label: "EVIO",
        gate: Gate::WhenSet("EVIOROOT"),
        steps: &[
            Step::Set("EVIOROOT", Value::Var("EVIOROOT")),
            Step::Prepend(PathList::Library, "${EVIOROOT}/lib"),
        ],
    },
    Subsystem {
        label: "ET",
        gate: Gate::WhenSet("ETROOT"),
        steps: &[
            Step::Set("ETROOT", Value::Var("ETROOT")),
            Step::Prepend(PathList::Library, "${ETROOT}/lib"),
        ],
    },
];

/// Fallback values, keyed by variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults(BTreeMap<String, String>);

impl Default for Defaults {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Defaults {
    /// The built-in defaults from [`BUILTIN_DEFAULTS`].
    #[must_use]
    pub fn builtin() -> Self {
        Self(
            BUILTIN_DEFAULTS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    /// A table with no defaults at all.
    #[must_use]
    pub const fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// Replaces (or adds) the default for `var`.
    #[must_use]
    pub fn with(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(var.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, var: &str) -> Option<&str> {
        self.0.get(var).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Present in the environment snapshot.
    Environment,
    /// Taken from the defaults table.
    Default,
    /// Computed from the build environment or fixed text.
    Derived,
    /// Not available; the statement or block is skipped.
    Absent,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Environment => "environment",
            Self::Default => "default",
            Self::Derived => "derived",
            Self::Absent => "absent",
        })
    }
}

/// Inputs a [`Value`] is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    pub env: &'a Env,
    pub defaults: &'a Defaults,
    pub build: &'a BuildEnv,
}

impl Lookup<'_> {
    /// Resolves `value`, returning `None` for a variable with neither a
    /// snapshot value nor a default.
    #[must_use]
    pub fn resolve(&self, value: Value) -> Option<(String, ValueSource)> {
        match value {
            Value::Var(var) => self
                .env
                .get(var)
                .map(|v| (v.to_string(), ValueSource::Environment))
                .or_else(|| {
                    self.defaults
                        .get(var)
                        .map(|v| (v.to_string(), ValueSource::Default))
                }),
            Value::Literal(text) => Some((text.to_string(), ValueSource::Derived)),
            Value::OsName => Some((self.build.os_name().to_string(), ValueSource::Derived)),
            Value::HalldHome => Some((
                self.build.halld_home().display().to_string(),
                ValueSource::Derived,
            )),
        }
    }
}

/// Per-subsystem summary for the `list` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsystemStatus {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<&'static str>,
    pub emitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub source: ValueSource,
}

/// Reports, for every subsystem, whether its block is emitted and where its
/// primary value comes from.
#[must_use]
pub fn status(lookup: &Lookup<'_>) -> Vec<SubsystemStatus> {
    SUBSYSTEMS
        .iter()
        .map(|subsystem| {
            let emitted = subsystem.gate.is_open(lookup.env);
            let resolved = if emitted {
                subsystem
                    .primary_value()
                    .and_then(|value| lookup.resolve(value))
            } else {
                None
            };
            let (value, source) = resolved
                .map_or((None, ValueSource::Absent), |(v, src)| (Some(v), src));
            SubsystemStatus {
                label: subsystem.label,
                variable: subsystem.primary_var(),
                emitted,
                value,
                source,
            }
        })
        .collect()
}
