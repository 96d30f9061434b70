// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/warden/warden.toml` < `~/.config/warden/warden.toml`
//! < `./warden.toml`, or a single explicit file, with `WARDEN_AGENT_*`
//! environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use tracing::debug;

use crate::model::{PluginConfigMap, WardenConfig};

/// Config files consulted when no explicit path is given, lowest precedence first.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/warden/warden.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("warden/warden.toml"));
    }
    paths.push(PathBuf::from("warden.toml"));
    paths
}

/// Load configuration from the standard lookup paths with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. each of [`default_config_paths`] that exists
/// 3. `WARDEN_AGENT_*` environment variables
pub fn load_config() -> Result<WardenConfig, figment::Error> {
    load_from_files(&default_config_paths())
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WardenConfig, figment::Error> {
    load_from_files(&[path.to_path_buf()])
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<WardenConfig, figment::Error> {
    let mut config: WardenConfig = Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()?;
    restore_plugin_order(&mut config.plugins, &[toml_content.to_string()]);
    Ok(config)
}

fn load_from_files(paths: &[PathBuf]) -> Result<WardenConfig, figment::Error> {
    let mut config: WardenConfig = build_figment(paths).extract()?;
    let sources: Vec<String> = paths
        .iter()
        .filter_map(|p| std::fs::read_to_string(p).ok())
        .collect();
    restore_plugin_order(&mut config.plugins, &sources);
    debug!(
        files = sources.len(),
        plugin_kinds = config.plugins.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Build the Figment used for loading, before extraction.
pub fn build_figment(paths: &[PathBuf]) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(WardenConfig::default()));
    for path in paths {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Environment provider for agent settings.
///
/// Only `WARDEN_AGENT_*` variables are read, so unrelated `WARDEN_*`
/// variables (such as `WARDEN_CONFIG`) never trip `deny_unknown_fields`.
/// `Env::map` is used instead of `Env::split("_")` because keys like
/// `trust_domain` contain underscores.
fn env_provider() -> Env {
    Env::prefixed("WARDEN_")
        .filter(|key| key.as_str().to_ascii_lowercase().starts_with("agent_"))
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("agent_", "agent.", 1)
                .into()
        })
}

/// Reorder plugin tables to match the order they were declared in `sources`.
///
/// Figment merges through sorted maps, so declaration order is lost during
/// extraction. Each source is re-read with an order-preserving TOML table;
/// the first declaration of a kind or name fixes its position. Entries not
/// found in any source keep their relative order at the end.
pub fn restore_plugin_order(plugins: &mut PluginConfigMap, sources: &[String]) {
    let mut declared: Vec<(String, Vec<String>)> = Vec::new();
    for source in sources {
        let Ok(table) = source.parse::<toml::Table>() else {
            continue;
        };
        let Some(toml::Value::Table(kinds)) = table.get("plugins") else {
            continue;
        };
        for (kind, names) in kinds {
            let position = match declared.iter().position(|(k, _)| k == kind) {
                Some(i) => i,
                None => {
                    declared.push((kind.clone(), Vec::new()));
                    declared.len() - 1
                }
            };
            if let toml::Value::Table(names) = names {
                let known = &mut declared[position].1;
                for name in names.keys() {
                    if !known.contains(name) {
                        known.push(name.clone());
                    }
                }
            }
        }
    }

    let mut remaining = std::mem::take(plugins);
    for (kind, names) in declared {
        let Some(mut entries) = remaining.shift_remove(&kind) else {
            continue;
        };
        let mut ordered = IndexMap::with_capacity(entries.len());
        for name in names {
            if let Some(entry) = entries.shift_remove(&name) {
                ordered.insert(name, entry);
            }
        }
        ordered.extend(entries);
        plugins.insert(kind, ordered);
    }
    plugins.extend(remaining);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PluginConfigEntry;

    fn names(plugins: &PluginConfigMap, kind: &str) -> Vec<String> {
        plugins[kind].keys().cloned().collect()
    }

    #[test]
    fn load_from_str_preserves_declaration_order() {
        let config = load_config_from_str(
            r#"
[plugins.WorkloadAttestor.unix]
[plugins.WorkloadAttestor.docker]
[plugins.WorkloadAttestor.k8s]
[plugins.KeyManager.memory]
"#,
        )
        .unwrap();
        let kinds: Vec<&String> = config.plugins.keys().collect();
        assert_eq!(kinds, vec!["WorkloadAttestor", "KeyManager"]);
        assert_eq!(
            names(&config.plugins, "WorkloadAttestor"),
            vec!["unix", "docker", "k8s"]
        );
    }

    #[test]
    fn restore_order_keeps_undeclared_entries() {
        let mut plugins = PluginConfigMap::new();
        let mut attestors = IndexMap::new();
        attestors.insert("a".to_string(), PluginConfigEntry::default());
        attestors.insert("b".to_string(), PluginConfigEntry::default());
        attestors.insert("z".to_string(), PluginConfigEntry::default());
        plugins.insert("WorkloadAttestor".to_string(), attestors);

        let source = "[plugins.WorkloadAttestor.z]\n[plugins.WorkloadAttestor.b]\n".to_string();
        restore_plugin_order(&mut plugins, &[source]);

        assert_eq!(names(&plugins, "WorkloadAttestor"), vec!["z", "b", "a"]);
    }

    #[test]
    fn restore_order_first_source_wins() {
        let mut plugins = PluginConfigMap::new();
        let mut attestors = IndexMap::new();
        attestors.insert("docker".to_string(), PluginConfigEntry::default());
        attestors.insert("unix".to_string(), PluginConfigEntry::default());
        plugins.insert("WorkloadAttestor".to_string(), attestors);

        let system = "[plugins.WorkloadAttestor.unix]\n".to_string();
        let local = "[plugins.WorkloadAttestor.docker]\n[plugins.WorkloadAttestor.unix]\n".to_string();
        restore_plugin_order(&mut plugins, &[system, local]);

        assert_eq!(names(&plugins, "WorkloadAttestor"), vec!["unix", "docker"]);
    }

    #[test]
    fn restore_order_ignores_unparseable_sources() {
        let mut plugins = PluginConfigMap::new();
        plugins.insert("KeyManager".to_string(), IndexMap::new());
        restore_plugin_order(&mut plugins, &["not [valid".to_string()]);
        assert_eq!(plugins.len(), 1);
    }
}
