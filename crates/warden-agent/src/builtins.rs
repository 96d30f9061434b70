// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugins compiled into the agent.

use warden_attestor::{JoinTokenAttestor, UnixAttestor};
use warden_catalog::{BuiltIn, PluginRegistry};
use warden_core::{PluginInstance, PluginKind, WardenError};
use warden_keymanager::{DiskKeyManager, MemoryKeyManager};

/// Build the registry of built-in plugins.
///
/// `memory` is the default key manager when none is configured.
pub fn builtins() -> Result<PluginRegistry, WardenError> {
    let mut registry = PluginRegistry::new([
        PluginKind::KeyManager,
        PluginKind::NodeAttestor,
        PluginKind::WorkloadAttestor,
    ]);

    registry.register_default(BuiltIn::new(
        PluginKind::KeyManager,
        MemoryKeyManager::NAME,
        || Ok(PluginInstance::key_manager(MemoryKeyManager::new())),
    ))?;
    registry.register(BuiltIn::new(
        PluginKind::KeyManager,
        DiskKeyManager::NAME,
        || Ok(PluginInstance::key_manager(DiskKeyManager::new())),
    ))?;
    registry.register(BuiltIn::new(
        PluginKind::NodeAttestor,
        JoinTokenAttestor::NAME,
        || Ok(PluginInstance::node_attestor(JoinTokenAttestor::new())),
    ))?;
    registry.register(BuiltIn::new(
        PluginKind::WorkloadAttestor,
        UnixAttestor::NAME,
        || Ok(PluginInstance::workload_attestor(UnixAttestor::new())),
    ))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_builtin() {
        let registry = builtins().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.builtin_names(PluginKind::KeyManager),
            vec!["disk", "memory"]
        );
        assert_eq!(registry.default_for(PluginKind::KeyManager), Some("memory"));
        assert_eq!(registry.default_for(PluginKind::NodeAttestor), None);
        assert_eq!(registry.default_for(PluginKind::WorkloadAttestor), None);
    }

    #[test]
    fn factories_produce_matching_instances() {
        let registry = builtins().unwrap();
        for id in registry.list_all() {
            let instance = registry.get(id).unwrap().create().unwrap();
            assert_eq!(instance.kind(), id.kind);
            assert_eq!(instance.name(), id.name);
        }
    }
}
