// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition root for the Warden agent's plugins.
//!
//! [`load`] resolves the `[plugins.*]` configuration against the built-in
//! registry and fills an [`AgentCatalog`]: exactly one key manager,
//! exactly one node attestor and at least one workload attestor.

pub mod builtins;
pub mod catalog;
pub mod shutdown;

use std::sync::Arc;

use tracing::info;
use warden_catalog::{Closer, FillConfig, PluginLoader, PluginRegistry, UnsupportedLoader};
use warden_config::{PluginConfigMap, WardenConfig};
use warden_core::{GlobalConfig, HostService, KeyManager, WardenError};

pub use builtins::builtins;
pub use catalog::{
    AgentCatalog, KeyManagerEntry, NodeAttestorEntry, PluginEntry, WorkloadAttestorEntry,
};

/// Inputs for [`load`].
pub struct LoadConfig {
    pub global: GlobalConfig,
    pub plugins: PluginConfigMap,
    /// Forwarded to the loader for every external plugin.
    pub host_services: Vec<Arc<dyn HostService>>,
    pub loader: Arc<dyn PluginLoader>,
}

impl LoadConfig {
    /// Settings from a parsed configuration file, with no host services and
    /// no support for external plugins.
    pub fn from_config(config: &WardenConfig) -> Self {
        Self {
            global: config.agent.global(),
            plugins: config.plugins.clone(),
            host_services: Vec::new(),
            loader: Arc::new(UnsupportedLoader),
        }
    }
}

/// Load the agent catalog with the built-in plugins.
///
/// The returned [`Closer`] must be closed to shut the plugins down.
pub async fn load(config: LoadConfig) -> Result<(AgentCatalog, Closer), WardenError> {
    let registry = builtins()?;
    load_with_registry(config, &registry).await
}

/// Load the agent catalog against a caller-supplied registry.
pub async fn load_with_registry(
    config: LoadConfig,
    registry: &PluginRegistry,
) -> Result<(AgentCatalog, Closer), WardenError> {
    let records = warden_catalog::resolve(&config.plugins, registry)?;
    let (catalog, closer) = warden_catalog::fill::<AgentCatalog>(FillConfig {
        global: config.global,
        plugins: records,
        registry,
        loader: config.loader.as_ref(),
        host_services: &config.host_services,
    })
    .await?;

    info!(
        key_manager = catalog.key_manager_entry().name(),
        node_attestor = catalog.node_attestor().name(),
        workload_attestors = catalog.workload_attestors().len(),
        "agent catalog ready"
    );
    Ok((catalog, closer))
}

/// Return the stored agent key, generating and storing one if none exists.
///
/// The returned bytes are the PKCS#8 private key.
pub async fn ensure_agent_key(key_manager: &dyn KeyManager) -> Result<Vec<u8>, WardenError> {
    if let Some(key) = key_manager.fetch_private_key().await? {
        info!("using stored agent key");
        return Ok(key);
    }
    let pair = key_manager.generate_key_pair().await?;
    key_manager.store_private_key(&pair.private_key).await?;
    info!(public_key_len = pair.public_key.len(), "generated new agent key");
    Ok(pair.private_key)
}
