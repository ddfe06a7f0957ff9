// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment snapshot container.
//!
//! ```text
//! Env
//! vars: Arc<BTreeMap<String, String>>
//! clone shares the map until set()/remove() (Arc::make_mut)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

/// An immutable-by-default snapshot of environment variables.
///
/// Names are case-sensitive, as on every platform the generated scripts
/// target. Cloning is cheap; the map is copied on first modification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: Arc<BTreeMap<String, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars),
        }
    }

    /// Sets a variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.vars).insert(key.into(), value.into());
        self
    }

    /// Removes a variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.vars.contains_key(key) {
            Arc::make_mut(&mut self.vars).remove(key);
        }
        self
    }

    /// Gets a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Gets a variable value, or `default` when the variable is unset.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Returns true if the variable is present (even when empty).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Returns an iterator over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
