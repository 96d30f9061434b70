// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that every plugin implements.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::types::{ConfigureRequest, PluginInfo, PluginKind};

/// The lifecycle contract the catalog drives for every plugin.
///
/// The catalog calls [`configure`](Self::configure) once after
/// instantiation and [`shutdown`](Self::shutdown) at most once during
/// teardown.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Implementation name, e.g. `memory`.
    fn name(&self) -> &str;

    /// Semantic version of this implementation.
    fn version(&self) -> semver::Version;

    /// Capability this plugin provides.
    fn kind(&self) -> PluginKind;

    /// Apply implementation-specific and global configuration.
    async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError>;

    /// Report identity metadata.
    async fn plugin_info(&self) -> Result<PluginInfo, WardenError> {
        Ok(PluginInfo {
            name: self.name().to_string(),
            version: self.version(),
            description: String::new(),
        })
    }

    /// Release held resources.
    async fn shutdown(&self) -> Result<(), WardenError>;
}
