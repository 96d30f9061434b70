// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative slot tables and the values bound into them.

use std::collections::HashMap;
use std::sync::Arc;

use warden_core::{
    KeyManager, NodeAttestor, PluginId, PluginInstance, PluginKind, WardenError, WorkloadAttestor,
};

/// How many enabled plugins of a kind a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ExactlyOne,
    /// `AtLeast(0)` accepts any number, including none.
    AtLeast(usize),
}

impl Cardinality {
    /// Check the names of the enabled plugins matching a slot of `kind`.
    pub fn check(self, kind: PluginKind, names: &[&str]) -> Result<(), WardenError> {
        match self {
            Cardinality::ExactlyOne => match names.len() {
                1 => Ok(()),
                0 => Err(WardenError::MissingPlugin { kind }),
                _ => Err(WardenError::AmbiguousPlugin {
                    kind,
                    names: names.iter().map(|n| n.to_string()).collect(),
                }),
            },
            Cardinality::AtLeast(min) if names.len() < min => {
                Err(WardenError::InsufficientPlugins {
                    kind,
                    min,
                    found: names.len(),
                })
            }
            Cardinality::AtLeast(_) => Ok(()),
        }
    }
}

/// One field of a plugin set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub id: &'static str,
    pub kind: PluginKind,
    pub cardinality: Cardinality,
}

impl SlotSpec {
    pub const fn exactly_one(id: &'static str, kind: PluginKind) -> Self {
        Self {
            id,
            kind,
            cardinality: Cardinality::ExactlyOne,
        }
    }

    pub const fn at_least(id: &'static str, kind: PluginKind, min: usize) -> Self {
        Self {
            id,
            kind,
            cardinality: Cardinality::AtLeast(min),
        }
    }
}

/// A configured plugin instance together with its identity.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    pub id: PluginId,
    pub built_in: bool,
    pub instance: PluginInstance,
}

impl LoadedPlugin {
    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn key_manager(&self) -> Result<Arc<dyn KeyManager>, WardenError> {
        self.instance
            .as_key_manager()
            .cloned()
            .ok_or_else(|| self.kind_mismatch(PluginKind::KeyManager))
    }

    pub fn node_attestor(&self) -> Result<Arc<dyn NodeAttestor>, WardenError> {
        self.instance
            .as_node_attestor()
            .cloned()
            .ok_or_else(|| self.kind_mismatch(PluginKind::NodeAttestor))
    }

    pub fn workload_attestor(&self) -> Result<Arc<dyn WorkloadAttestor>, WardenError> {
        self.instance
            .as_workload_attestor()
            .cloned()
            .ok_or_else(|| self.kind_mismatch(PluginKind::WorkloadAttestor))
    }

    fn kind_mismatch(&self, wanted: PluginKind) -> WardenError {
        WardenError::Internal(format!(
            "plugin {} is a {}, not a {wanted}",
            self.id,
            self.instance.kind()
        ))
    }
}

/// Plugins assigned to each slot of a set, keyed by slot id.
#[derive(Debug, Default)]
pub struct BoundSlots {
    slots: HashMap<&'static str, Vec<LoadedPlugin>>,
}

impl BoundSlots {
    pub(crate) fn insert(&mut self, slot: &'static str, plugins: Vec<LoadedPlugin>) {
        self.slots.insert(slot, plugins);
    }

    /// Take the single plugin bound to an exactly-one slot.
    pub fn take_one(&mut self, slot: &str) -> Result<LoadedPlugin, WardenError> {
        let mut plugins = self.take_all(slot)?;
        match (plugins.pop(), plugins.is_empty()) {
            (Some(plugin), true) => Ok(plugin),
            _ => Err(WardenError::Internal(format!(
                "slot `{slot}` does not hold exactly one plugin"
            ))),
        }
    }

    /// Take every plugin bound to a slot, in declaration order.
    pub fn take_all(&mut self, slot: &str) -> Result<Vec<LoadedPlugin>, WardenError> {
        self.slots
            .remove(slot)
            .ok_or_else(|| WardenError::Internal(format!("slot `{slot}` was not bound")))
    }
}

/// A typed collection of plugin slots that [`fill`](crate::fill) can populate.
pub trait PluginSet: Sized {
    /// The slots to bind, in binding order.
    fn slots() -> Vec<SlotSpec>;

    /// Build the set from bound slots.
    fn from_bound(bound: BoundSlots) -> Result<Self, WardenError>;
}
