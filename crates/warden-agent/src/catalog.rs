// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The agent's plugin slots and the typed catalog they fill.

use std::sync::Arc;

use warden_catalog::{BoundSlots, LoadedPlugin, PluginSet, SlotSpec};
use warden_core::{KeyManager, NodeAttestor, PluginId, PluginKind, WardenError, WorkloadAttestor};

const KEY_MANAGER: &str = "key_manager";
const NODE_ATTESTOR: &str = "node_attestor";
const WORKLOAD_ATTESTORS: &str = "workload_attestors";

/// A loaded plugin's metadata paired with its typed interface.
pub struct PluginEntry<T: ?Sized> {
    loaded: LoadedPlugin,
    plugin: Arc<T>,
}

pub type KeyManagerEntry = PluginEntry<dyn KeyManager>;
pub type NodeAttestorEntry = PluginEntry<dyn NodeAttestor>;
pub type WorkloadAttestorEntry = PluginEntry<dyn WorkloadAttestor>;

impl<T: ?Sized> PluginEntry<T> {
    pub fn id(&self) -> &PluginId {
        &self.loaded.id
    }

    pub fn name(&self) -> &str {
        self.loaded.name()
    }

    /// Whether the plugin is compiled in rather than external.
    pub fn is_built_in(&self) -> bool {
        self.loaded.built_in
    }

    pub fn plugin(&self) -> &Arc<T> {
        &self.plugin
    }
}

impl KeyManagerEntry {
    fn key_manager(loaded: LoadedPlugin) -> Result<Self, WardenError> {
        let plugin = loaded.key_manager()?;
        Ok(Self { loaded, plugin })
    }
}

impl NodeAttestorEntry {
    fn node_attestor(loaded: LoadedPlugin) -> Result<Self, WardenError> {
        let plugin = loaded.node_attestor()?;
        Ok(Self { loaded, plugin })
    }
}

impl WorkloadAttestorEntry {
    fn workload_attestor(loaded: LoadedPlugin) -> Result<Self, WardenError> {
        let plugin = loaded.workload_attestor()?;
        Ok(Self { loaded, plugin })
    }
}

impl<T: ?Sized> std::fmt::Debug for PluginEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("id", &self.loaded.id)
            .field("built_in", &self.loaded.built_in)
            .finish()
    }
}

/// Every plugin the agent runs with.
///
/// Built once by [`load`](crate::load) and read-only afterwards. The
/// plugins stay alive until the accompanying `Closer` shuts them down.
#[derive(Debug)]
pub struct AgentCatalog {
    key_manager: KeyManagerEntry,
    node_attestor: NodeAttestorEntry,
    workload_attestors: Vec<WorkloadAttestorEntry>,
}

impl AgentCatalog {
    pub fn key_manager(&self) -> &Arc<dyn KeyManager> {
        self.key_manager.plugin()
    }

    pub fn key_manager_entry(&self) -> &KeyManagerEntry {
        &self.key_manager
    }

    pub fn node_attestor(&self) -> &NodeAttestorEntry {
        &self.node_attestor
    }

    /// Workload attestors, in configuration order.
    pub fn workload_attestors(&self) -> &[WorkloadAttestorEntry] {
        &self.workload_attestors
    }

    /// Identities of every plugin in the catalog, slot by slot.
    pub fn plugin_ids(&self) -> Vec<&PluginId> {
        std::iter::once(self.key_manager.id())
            .chain(std::iter::once(self.node_attestor.id()))
            .chain(self.workload_attestors.iter().map(PluginEntry::id))
            .collect()
    }
}

impl PluginSet for AgentCatalog {
    fn slots() -> Vec<SlotSpec> {
        vec![
            SlotSpec::exactly_one(KEY_MANAGER, PluginKind::KeyManager),
            SlotSpec::exactly_one(NODE_ATTESTOR, PluginKind::NodeAttestor),
            SlotSpec::at_least(WORKLOAD_ATTESTORS, PluginKind::WorkloadAttestor, 1),
        ]
    }

    fn from_bound(mut bound: BoundSlots) -> Result<Self, WardenError> {
        Ok(Self {
            key_manager: KeyManagerEntry::key_manager(bound.take_one(KEY_MANAGER)?)?,
            node_attestor: NodeAttestorEntry::node_attestor(bound.take_one(NODE_ATTESTOR)?)?,
            workload_attestors: bound
                .take_all(WORKLOAD_ATTESTORS)?
                .into_iter()
                .map(WorkloadAttestorEntry::workload_attestor)
                .collect::<Result<_, _>>()?,
        })
    }
}
