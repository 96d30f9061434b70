// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Warden agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use warden_core::GlobalConfig;

/// Per-plugin configuration, keyed by kind name then implementation name.
///
/// Kind names are kept as written (`KeyManager` or `key_manager`); the
/// catalog resolver parses and validates them. Iteration order follows the
/// order the tables were declared in.
pub type PluginConfigMap = IndexMap<String, IndexMap<String, PluginConfigEntry>>;

/// Top-level Warden configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WardenConfig {
    /// Agent identity and storage settings, shared with every plugin.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Plugin selection and per-plugin settings.
    #[serde(default)]
    pub plugins: PluginConfigMap,
}

/// Agent-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Trust domain the agent belongs to, e.g. `example.org`.
    #[serde(default)]
    pub trust_domain: String,

    /// Directory the agent and its plugins persist state under.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            trust_domain: String::new(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl AgentConfig {
    /// The subset of agent settings every plugin receives on configure.
    pub fn global(&self) -> GlobalConfig {
        GlobalConfig {
            trust_domain: self.trust_domain.clone(),
            data_dir: PathBuf::from(&self.data_dir),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("warden"))
        .unwrap_or_else(|| PathBuf::from(".data"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for one plugin implementation.
///
/// An entry without `plugin_cmd` selects a built-in; an entry with one
/// names an external plugin binary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfigEntry {
    /// Path of an external plugin executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_cmd: Option<String>,

    /// Expected SHA-256 of the external plugin executable, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_checksum: Option<String>,

    /// Implementation-specific settings: a string, or a table that is
    /// handed to the plugin as TOML text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_data: Option<toml::Value>,

    /// Set to `false` to keep the entry but skip loading it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl PluginConfigEntry {
    /// Whether the catalog should bind this plugin (defaults to true).
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// The external command, if any. Blank strings count as absent.
    pub fn external_cmd(&self) -> Option<&str> {
        self.plugin_cmd
            .as_deref()
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty())
    }
}
