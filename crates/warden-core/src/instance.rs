// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed handle to a live plugin instance.

use std::sync::Arc;

use crate::error::WardenError;
use crate::traits::{KeyManager, NodeAttestor, WorkloadAttestor};
use crate::types::{ConfigureRequest, PluginInfo, PluginKind};

/// A live plugin, tagged by the capability it implements.
///
/// Cloning clones the inner `Arc`, so every clone refers to the same
/// instance.
#[derive(Clone)]
pub enum PluginInstance {
    KeyManager(Arc<dyn KeyManager>),
    NodeAttestor(Arc<dyn NodeAttestor>),
    WorkloadAttestor(Arc<dyn WorkloadAttestor>),
}

impl PluginInstance {
    pub fn key_manager(plugin: impl KeyManager) -> Self {
        Self::KeyManager(Arc::new(plugin))
    }

    pub fn node_attestor(plugin: impl NodeAttestor) -> Self {
        Self::NodeAttestor(Arc::new(plugin))
    }

    pub fn workload_attestor(plugin: impl WorkloadAttestor) -> Self {
        Self::WorkloadAttestor(Arc::new(plugin))
    }

    /// The capability this instance was registered under.
    pub fn kind(&self) -> PluginKind {
        match self {
            Self::KeyManager(_) => PluginKind::KeyManager,
            Self::NodeAttestor(_) => PluginKind::NodeAttestor,
            Self::WorkloadAttestor(_) => PluginKind::WorkloadAttestor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::KeyManager(p) => p.name(),
            Self::NodeAttestor(p) => p.name(),
            Self::WorkloadAttestor(p) => p.name(),
        }
    }

    pub async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError> {
        match self {
            Self::KeyManager(p) => p.configure(request).await,
            Self::NodeAttestor(p) => p.configure(request).await,
            Self::WorkloadAttestor(p) => p.configure(request).await,
        }
    }

    pub async fn plugin_info(&self) -> Result<PluginInfo, WardenError> {
        match self {
            Self::KeyManager(p) => p.plugin_info().await,
            Self::NodeAttestor(p) => p.plugin_info().await,
            Self::WorkloadAttestor(p) => p.plugin_info().await,
        }
    }

    pub async fn shutdown(&self) -> Result<(), WardenError> {
        match self {
            Self::KeyManager(p) => p.shutdown().await,
            Self::NodeAttestor(p) => p.shutdown().await,
            Self::WorkloadAttestor(p) => p.shutdown().await,
        }
    }

    pub fn as_key_manager(&self) -> Option<&Arc<dyn KeyManager>> {
        match self {
            Self::KeyManager(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_node_attestor(&self) -> Option<&Arc<dyn NodeAttestor>> {
        match self {
            Self::NodeAttestor(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_workload_attestor(&self) -> Option<&Arc<dyn WorkloadAttestor>> {
        match self {
            Self::WorkloadAttestor(p) => Some(p),
            _ => None,
        }
    }
}

impl std::fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginInstance")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

impl From<Arc<dyn KeyManager>> for PluginInstance {
    fn from(plugin: Arc<dyn KeyManager>) -> Self {
        Self::KeyManager(plugin)
    }
}

impl From<Arc<dyn NodeAttestor>> for PluginInstance {
    fn from(plugin: Arc<dyn NodeAttestor>) -> Self {
        Self::NodeAttestor(plugin)
    }
}

impl From<Arc<dyn WorkloadAttestor>> for PluginInstance {
    fn from(plugin: Arc<dyn WorkloadAttestor>) -> Self {
        Self::WorkloadAttestor(plugin)
    }
}
