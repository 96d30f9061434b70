// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory key manager.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;
use warden_core::{
    ConfigureRequest, KeyManager, KeyPair, PluginAdapter, PluginInfo, PluginKind, WardenError,
};
use zeroize::Zeroizing;

use crate::crypto;

/// Keeps one private key in process memory.
///
/// Generation never touches the stored key. Stores are exclusive and
/// fetches are shared, so any number of fetches may run concurrently.
#[derive(Default)]
pub struct MemoryKeyManager {
    key: RwLock<Option<Zeroizing<Vec<u8>>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemorySettings {}

impl MemoryKeyManager {
    pub const NAME: &'static str = "memory";

    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PluginAdapter for MemoryKeyManager {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> PluginKind {
        PluginKind::KeyManager
    }

    async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError> {
        toml::from_str::<MemorySettings>(&request.configuration)
            .map_err(|e| WardenError::Config(format!("memory key manager: {}", e.message())))?;
        Ok(())
    }

    async fn plugin_info(&self) -> Result<PluginInfo, WardenError> {
        Ok(PluginInfo {
            name: Self::NAME.to_string(),
            version: self.version(),
            description: "Holds the agent key in memory".to_string(),
        })
    }

    async fn shutdown(&self) -> Result<(), WardenError> {
        // Dropping the Zeroizing buffer wipes it.
        self.key.write().await.take();
        debug!("memory key manager cleared");
        Ok(())
    }
}

#[async_trait]
impl KeyManager for MemoryKeyManager {
    async fn generate_key_pair(&self) -> Result<KeyPair, WardenError> {
        crypto::generate_key_pair()
    }

    async fn store_private_key(&self, private_key: &[u8]) -> Result<(), WardenError> {
        let key = crypto::validated_copy(private_key)?;
        *self.key.write().await = Some(key);
        Ok(())
    }

    async fn fetch_private_key(&self) -> Result<Option<Vec<u8>>, WardenError> {
        Ok(self.key.read().await.as_ref().map(|key| key.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn fetch_before_store_is_empty() {
        let km = MemoryKeyManager::new();
        assert_eq!(km.fetch_private_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_then_fetch_roundtrip() {
        let km = MemoryKeyManager::new();
        let pair = km.generate_key_pair().await.unwrap();

        // Generating does not store.
        assert_eq!(km.fetch_private_key().await.unwrap(), None);

        km.store_private_key(&pair.private_key).await.unwrap();
        assert_eq!(
            km.fetch_private_key().await.unwrap(),
            Some(pair.private_key.clone())
        );
    }

    #[tokio::test]
    async fn store_replaces_previous_key() {
        let km = MemoryKeyManager::new();
        let first = km.generate_key_pair().await.unwrap();
        let second = km.generate_key_pair().await.unwrap();

        km.store_private_key(&first.private_key).await.unwrap();
        km.store_private_key(&second.private_key).await.unwrap();
        assert_eq!(
            km.fetch_private_key().await.unwrap(),
            Some(second.private_key)
        );
    }

    #[tokio::test]
    async fn invalid_key_keeps_previous() {
        let km = MemoryKeyManager::new();
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();

        assert!(km.store_private_key(b"junk").await.is_err());
        assert_eq!(
            km.fetch_private_key().await.unwrap(),
            Some(pair.private_key)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_fetches_see_the_stored_key() {
        let km = Arc::new(MemoryKeyManager::new());
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let km = km.clone();
                tokio::spawn(async move { km.fetch_private_key().await })
            })
            .collect();
        for task in tasks {
            let fetched = task.await.unwrap().unwrap();
            assert_eq!(fetched.as_deref(), Some(pair.private_key.as_slice()));
        }
    }

    #[tokio::test]
    async fn fetch_proceeds_while_another_read_is_held() {
        let km = MemoryKeyManager::new();
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();

        let in_flight = km.key.read().await;
        let fetched = tokio::time::timeout(Duration::from_secs(1), km.fetch_private_key())
            .await
            .expect("fetch blocked behind a concurrent read")
            .unwrap();
        assert_eq!(fetched, Some(pair.private_key.clone()));

        let store = tokio::time::timeout(
            Duration::from_millis(50),
            km.store_private_key(&pair.private_key),
        )
        .await;
        assert!(store.is_err(), "store must wait for readers");

        drop(in_flight);
        km.store_private_key(&pair.private_key).await.unwrap();
    }

    #[tokio::test]
    async fn configure_rejects_settings() {
        let km = MemoryKeyManager::new();
        km.configure(ConfigureRequest::default()).await.unwrap();

        let err = km
            .configure(ConfigureRequest {
                configuration: "directory = \"/tmp\"".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("memory key manager"));
    }

    #[tokio::test]
    async fn shutdown_clears_key() {
        let km = MemoryKeyManager::new();
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();
        km.shutdown().await.unwrap();
        assert_eq!(km.fetch_private_key().await.unwrap(), None);
    }
}
