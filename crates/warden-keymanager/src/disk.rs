// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key manager that persists the private key to a file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use warden_core::{
    ConfigureRequest, KeyManager, KeyPair, PluginAdapter, PluginInfo, PluginKind, WardenError,
};

use crate::crypto;

const KEY_FILE: &str = "private_key.der";
const TEMP_FILE: &str = "private_key.der.tmp";

/// Stores the private key as `<directory>/private_key.der`.
///
/// Writes go to a temporary file that is renamed over the key file, so a
/// crash never leaves a partially written key behind.
#[derive(Default)]
pub struct DiskKeyManager {
    /// Configured key directory. The lock also serializes file access.
    directory: RwLock<Option<PathBuf>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiskSettings {
    /// Relative paths are taken relative to the agent data directory.
    directory: PathBuf,
}

impl DiskKeyManager {
    pub const NAME: &'static str = "disk";

    pub fn new() -> Self {
        Self::default()
    }

    fn not_configured() -> WardenError {
        WardenError::KeyManager("disk key manager is not configured".to_string())
    }
}

#[async_trait]
impl PluginAdapter for DiskKeyManager {
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
        let settings: DiskSettings = toml::from_str(&request.configuration)
            .map_err(|e| WardenError::Config(format!("disk key manager: {}", e.message())))?;
        if settings.directory.as_os_str().is_empty() {
            return Err(WardenError::Config(
                "disk key manager: directory must not be empty".to_string(),
            ));
        }

        let directory = if settings.directory.is_relative() {
            request.global.data_dir.join(settings.directory)
        } else {
            settings.directory
        };
        info!(directory = %directory.display(), "disk key manager configured");
        *self.directory.write().await = Some(directory);
        Ok(())
    }

    async fn plugin_info(&self) -> Result<PluginInfo, WardenError> {
        Ok(PluginInfo {
            name: Self::NAME.to_string(),
            version: self.version(),
            description: "Persists the agent key to disk".to_string(),
        })
    }

    async fn shutdown(&self) -> Result<(), WardenError> {
        Ok(())
    }
}

#[async_trait]
impl KeyManager for DiskKeyManager {
    async fn generate_key_pair(&self) -> Result<KeyPair, WardenError> {
        crypto::generate_key_pair()
    }

    async fn store_private_key(&self, private_key: &[u8]) -> Result<(), WardenError> {
        let key = crypto::validated_copy(private_key)?;
        let guard = self.directory.write().await;
        let directory = guard.as_deref().ok_or_else(Self::not_configured)?;

        tokio::fs::create_dir_all(directory).await?;
        let temp = directory.join(TEMP_FILE);
        write_private(&temp, &key).await?;
        tokio::fs::rename(&temp, directory.join(KEY_FILE)).await?;
        debug!(directory = %directory.display(), "private key stored");
        Ok(())
    }

    async fn fetch_private_key(&self) -> Result<Option<Vec<u8>>, WardenError> {
        let guard = self.directory.read().await;
        let directory = guard.as_deref().ok_or_else(Self::not_configured)?;

        match tokio::fs::read(directory.join(KEY_FILE)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `bytes` to a fresh file readable only by the owner.
async fn write_private(path: &Path, bytes: &[u8]) -> Result<(), WardenError> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden_core::GlobalConfig;

    use super::*;

    async fn configured(directory: &Path) -> DiskKeyManager {
        let km = DiskKeyManager::new();
        km.configure(ConfigureRequest {
            configuration: format!("directory = {:?}", directory.display().to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        km
    }

    #[tokio::test]
    async fn missing_file_fetches_none() {
        let dir = tempfile::tempdir().unwrap();
        let km = configured(dir.path()).await;
        assert_eq!(km.fetch_private_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn key_survives_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let km = configured(dir.path()).await;
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();

        let reopened = configured(dir.path()).await;
        assert_eq!(
            reopened.fetch_private_key().await.unwrap(),
            Some(pair.private_key)
        );
        assert!(!dir.path().join(TEMP_FILE).exists());
    }

    #[tokio::test]
    async fn store_replaces_previous_key() {
        let dir = tempfile::tempdir().unwrap();
        let km = configured(&dir.path().join("nested")).await;
        let first = km.generate_key_pair().await.unwrap();
        let second = km.generate_key_pair().await.unwrap();

        km.store_private_key(&first.private_key).await.unwrap();
        km.store_private_key(&second.private_key).await.unwrap();
        assert_eq!(
            km.fetch_private_key().await.unwrap(),
            Some(second.private_key)
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let km = configured(dir.path()).await;
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();

        let mode = std::fs::metadata(dir.path().join(KEY_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn relative_directory_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let km = DiskKeyManager::new();
        km.configure(ConfigureRequest {
            configuration: "directory = \"keys\"".into(),
            global: GlobalConfig {
                trust_domain: "example.org".into(),
                data_dir: dir.path().to_path_buf(),
            },
        })
        .await
        .unwrap();

        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();
        assert!(dir.path().join("keys").join(KEY_FILE).exists());
    }

    #[tokio::test]
    async fn unconfigured_use_fails() {
        let km = DiskKeyManager::new();
        assert!(km.fetch_private_key().await.is_err());
        let pair = km.generate_key_pair().await.unwrap();
        assert!(km.store_private_key(&pair.private_key).await.is_err());
    }

    #[tokio::test]
    async fn configure_requires_directory() {
        let km = DiskKeyManager::new();
        let err = km.configure(ConfigureRequest::default()).await.unwrap_err();
        assert!(err.to_string().contains("directory"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let km = Arc::new(configured(dir.path()).await);
        let pair = km.generate_key_pair().await.unwrap();
        km.store_private_key(&pair.private_key).await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let km = km.clone();
                tokio::spawn(async move { km.fetch_private_key().await })
            })
            .collect();
        for task in tasks {
            assert_eq!(
                task.await.unwrap().unwrap().as_deref(),
                Some(pair.private_key.as_slice())
            );
        }
    }
}
