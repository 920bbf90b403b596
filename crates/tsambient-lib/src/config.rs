//! Translation configuration.
//!
//! Every field has a built-in default, so a JSON config file only needs to
//! name what it changes. `presets/plugin-host.json` carries the settings for
//! the controller-extension API.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::mods::Mod;
use crate::{Error, Result};

const PLUGIN_HOST_PRESET: &str = include_str!("../presets/plugin-host.json");

/// Configuration for a translation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Exact type names replaced by a native target spelling.
    pub overrides: IndexMap<String, String>,
    /// Imports without a target equivalent: qualified names, or `pkg.*` prefixes.
    pub import_blocklist: Vec<String>,
    /// Declarations whose name (or a parent's name) ends with this render as call signatures.
    pub callback_suffix: String,
    /// Patches applied to per-file output before bundling.
    pub mods: Vec<Mod>,
    /// Text appended verbatim after the last namespace block.
    pub trailer: String,
    /// Where per-file output is written; defaults to `<output>.parts`.
    pub scratch_dir: Option<PathBuf>,
    /// Keep the scratch tree after a successful run.
    pub keep_scratch: bool,
}

impl Default for Config {
    fn default() -> Self {
        let overrides = [
            ("String", "string"),
            ("Integer", "number"),
            ("Long", "number"),
            ("Short", "number"),
            ("Byte", "number"),
            ("Float", "number"),
            ("Double", "number"),
            ("Number", "number"),
            ("Boolean", "boolean"),
            ("Object", "unknown"),
            ("Future", "unknown"),
            ("CompletableFuture", "unknown"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            overrides,
            import_blocklist: vec!["java.*".to_string(), "javax.*".to_string()],
            callback_suffix: "Callback".to_string(),
            mods: Vec::new(),
            trailer: String::new(),
            scratch_dir: None,
            keep_scratch: false,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for the controller-extension plugin-host API.
    pub fn plugin_host() -> Result<Self> {
        Self::from_json(PLUGIN_HOST_PRESET)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add or replace an override spelling.
    pub fn override_type(mut self, name: &str, spelling: &str) -> Self {
        self.overrides.insert(name.to_string(), spelling.to_string());
        self
    }

    /// Set the import block-list.
    pub fn import_blocklist(mut self, entries: Vec<String>) -> Self {
        self.import_blocklist = entries;
        self
    }

    /// Set the callback suffix token.
    pub fn callback_suffix(mut self, value: &str) -> Self {
        self.callback_suffix = value.to_string();
        self
    }

    /// Set the mod list.
    pub fn mods(mut self, mods: Vec<Mod>) -> Self {
        self.mods = mods;
        self
    }

    /// Set the trailer block.
    pub fn trailer(mut self, value: &str) -> Self {
        self.trailer = value.to_string();
        self
    }

    /// Set the scratch directory.
    pub fn scratch_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(path.into());
        self
    }

    /// Set whether the scratch tree survives a successful run.
    pub fn keep_scratch(mut self, value: bool) -> Self {
        self.keep_scratch = value;
        self
    }

    /// Target spelling for an exact type name, if overridden.
    pub fn spelling(&self, name: &str) -> Option<&str> {
        self.overrides.get(name).map(String::as_str)
    }

    /// Whether a qualified import has no target equivalent.
    pub fn is_blocked(&self, qualified: &str) -> bool {
        self.import_blocklist.iter().any(|entry| {
            match entry.strip_suffix(".*") {
                Some(package) => qualified
                    .strip_prefix(package)
                    .is_some_and(|rest| rest.starts_with('.')),
                None => entry == qualified,
            }
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
