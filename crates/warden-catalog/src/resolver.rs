// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns the nested per-plugin configuration map into an ordered list of
//! resolution records.

use std::collections::HashSet;
use std::str::FromStr;

use tracing::debug;
use warden_config::{PluginConfigEntry, PluginConfigMap, suggest_key};
use warden_core::{PluginId, PluginKind, WardenError};

use crate::registry::PluginRegistry;

/// Where a plugin implementation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// Compiled in and created through the registry.
    BuiltIn,
    /// A separate executable started by a [`PluginLoader`](crate::PluginLoader).
    External {
        cmd: String,
        checksum: Option<String>,
    },
}

/// One configured (or defaulted) plugin, ready for binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRecord {
    pub id: PluginId,
    pub source: PluginSource,
    /// Configuration text handed to the plugin's configure hook.
    pub data: String,
    pub enabled: bool,
}

impl PluginRecord {
    /// A record for a built-in with no configuration.
    pub fn built_in(kind: PluginKind, name: impl Into<String>) -> Self {
        Self {
            id: PluginId::new(kind, name),
            source: PluginSource::BuiltIn,
            data: String::new(),
            enabled: true,
        }
    }

    pub fn is_built_in(&self) -> bool {
        matches!(self.source, PluginSource::BuiltIn)
    }
}

/// Resolve configured plugins against `registry`.
///
/// Records come out in declaration order, followed by the registry's
/// default built-in for every supported kind that was not configured at
/// all. Disabled entries are kept with `enabled = false`.
pub fn resolve(
    plugins: &PluginConfigMap,
    registry: &PluginRegistry,
) -> Result<Vec<PluginRecord>, WardenError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (kind_name, entries) in plugins {
        let kind = parse_kind(kind_name, registry)?;
        for (name, entry) in entries {
            let id = PluginId::new(kind, name.as_str());
            if !seen.insert(id.clone()) {
                return Err(WardenError::DuplicatePlugin { id });
            }
            records.push(resolve_entry(id, entry, registry)?);
        }
    }

    for &kind in registry.known_kinds() {
        if records.iter().any(|r| r.id.kind == kind) {
            continue;
        }
        if let Some(name) = registry.default_for(kind) {
            debug!(kind = %kind, plugin = name, "no plugin configured, using default");
            records.push(PluginRecord::built_in(kind, name));
        }
    }

    Ok(records)
}

fn parse_kind(kind_name: &str, registry: &PluginRegistry) -> Result<PluginKind, WardenError> {
    match PluginKind::from_str(kind_name) {
        Ok(kind) if registry.supports(kind) => Ok(kind),
        Ok(kind) => Err(WardenError::Config(format!(
            "plugin kind {kind} is not supported by this agent"
        ))),
        Err(_) => {
            let known: Vec<String> = registry.known_kinds().iter().map(|k| k.to_string()).collect();
            let candidates: Vec<&str> = known.iter().map(String::as_str).collect();
            let hint = suggest_key(kind_name, &candidates)
                .map(|s| format!(" (did you mean `{s}`?)"))
                .unwrap_or_default();
            Err(WardenError::Config(format!(
                "unknown plugin kind `{kind_name}`{hint}"
            )))
        }
    }
}

fn resolve_entry(
    id: PluginId,
    entry: &PluginConfigEntry,
    registry: &PluginRegistry,
) -> Result<PluginRecord, WardenError> {
    let source = match entry.external_cmd() {
        Some(cmd) => {
            if registry.get(&id).is_some() {
                debug!(plugin = %id, cmd, "external plugin overrides built-in of the same name");
            }
            PluginSource::External {
                cmd: cmd.to_string(),
                checksum: entry.plugin_checksum.clone(),
            }
        }
        None => {
            if registry.get(&id).is_none() {
                let suggestion = suggest_key(&id.name, &registry.builtin_names(id.kind));
                return Err(WardenError::UnknownPlugin { id, suggestion });
            }
            PluginSource::BuiltIn
        }
    };

    let data = plugin_data_text(&id, entry.plugin_data.as_ref())?;
    Ok(PluginRecord {
        id,
        source,
        data,
        enabled: entry.is_enabled(),
    })
}

/// Normalize `plugin_data` into the text given to the configure hook.
fn plugin_data_text(id: &PluginId, data: Option<&toml::Value>) -> Result<String, WardenError> {
    match data {
        None => Ok(String::new()),
        Some(toml::Value::String(text)) => Ok(text.clone()),
        Some(toml::Value::Table(table)) => {
            toml::to_string(table).map_err(|e| WardenError::MalformedPluginData {
                id: id.clone(),
                reason: e.to_string(),
            })
        }
        Some(other) => Err(WardenError::MalformedPluginData {
            id: id.clone(),
            reason: format!("expected a string or table, found {}", other.type_str()),
        }),
    }
}
