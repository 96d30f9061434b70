// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam for starting external plugin processes.

use std::sync::Arc;

use async_trait::async_trait;
use warden_core::{HostService, PluginInstance, WardenError};

use crate::resolver::{PluginRecord, PluginSource};

/// Starts external plugins and connects them as typed instances.
///
/// The catalog hands each external record to the loader together with the
/// host services the plugin may call back into.
#[async_trait]
pub trait PluginLoader: Send + Sync {
    async fn load(
        &self,
        record: &PluginRecord,
        host_services: &[Arc<dyn HostService>],
    ) -> Result<PluginInstance, WardenError>;
}

/// A loader for hosts that only run built-in plugins.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLoader;

#[async_trait]
impl PluginLoader for UnsupportedLoader {
    async fn load(
        &self,
        record: &PluginRecord,
        _host_services: &[Arc<dyn HostService>],
    ) -> Result<PluginInstance, WardenError> {
        let cmd = match &record.source {
            PluginSource::External { cmd, .. } => cmd.as_str(),
            PluginSource::BuiltIn => "<built-in>",
        };
        Err(WardenError::Config(format!(
            "external plugins are not supported by this agent (plugin_cmd `{cmd}`)"
        )))
    }
}
