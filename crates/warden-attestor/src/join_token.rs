// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Join-token node attestor.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;
use warden_core::{
    AttestationData, ConfigureRequest, NodeAttestor, PluginAdapter, PluginInfo, PluginKind,
    WardenError,
};
use zeroize::Zeroizing;

/// Presents a pre-shared join token as attestation evidence.
#[derive(Default)]
pub struct JoinTokenAttestor {
    token: RwLock<Option<Zeroizing<String>>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JoinTokenSettings {
    token: String,
}

impl JoinTokenAttestor {
    pub const NAME: &'static str = "join_token";

    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PluginAdapter for JoinTokenAttestor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> PluginKind {
        PluginKind::NodeAttestor
    }

    async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError> {
        let settings: JoinTokenSettings = toml::from_str(&request.configuration)
            .map_err(|e| WardenError::Config(format!("join_token attestor: {}", e.message())))?;
        let token = Zeroizing::new(settings.token);
        if token.trim().is_empty() {
            return Err(WardenError::Config(
                "join_token attestor: token must not be empty".to_string(),
            ));
        }
        *self.token.write().await = Some(token);
        debug!("join token configured");
        Ok(())
    }

    async fn plugin_info(&self) -> Result<PluginInfo, WardenError> {
        Ok(PluginInfo {
            name: Self::NAME.to_string(),
            version: self.version(),
            description: "Attests the node with a pre-shared join token".to_string(),
        })
    }

    async fn shutdown(&self) -> Result<(), WardenError> {
        self.token.write().await.take();
        Ok(())
    }
}

#[async_trait]
impl NodeAttestor for JoinTokenAttestor {
    async fn fetch_attestation_data(&self) -> Result<AttestationData, WardenError> {
        let guard = self.token.read().await;
        let token = guard.as_ref().ok_or_else(|| {
            WardenError::Attestation("join_token attestor is not configured".to_string())
        })?;
        Ok(AttestationData {
            kind: Self::NAME.to_string(),
            payload: token.as_bytes().to_vec(),
        })
    }
}
