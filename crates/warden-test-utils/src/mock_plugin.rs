// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin with lifecycle recording and failure injection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::RwLock;

use warden_core::{
    AttestationData, ConfigureRequest, KeyManager, KeyPair, NodeAttestor, PluginAdapter, PluginId,
    PluginInstance, PluginKind, Selector, WardenError, WorkloadAttestor,
};

/// A lifecycle call observed on a mock plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created(PluginId),
    Configured { id: PluginId, configuration: String },
    ShutDown(PluginId),
}

/// Ordered log of lifecycle events shared by a group of mock plugins.
#[derive(Debug, Default)]
pub struct CallLog {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl CallLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, event: LifecycleEvent) {
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.lock().clone()
    }

    pub fn created(&self) -> Vec<PluginId> {
        self.filter(|e| match e {
            LifecycleEvent::Created(id) => Some(id.clone()),
            _ => None,
        })
    }

    pub fn configured(&self) -> Vec<PluginId> {
        self.filter(|e| match e {
            LifecycleEvent::Configured { id, .. } => Some(id.clone()),
            _ => None,
        })
    }

    pub fn shut_down(&self) -> Vec<PluginId> {
        self.filter(|e| match e {
            LifecycleEvent::ShutDown(id) => Some(id.clone()),
            _ => None,
        })
    }

    fn filter(&self, f: impl Fn(&LifecycleEvent) -> Option<PluginId>) -> Vec<PluginId> {
        self.lock().iter().filter_map(f).collect()
    }

    // A panicking test thread must not hide the events recorded before it.
    fn lock(&self) -> MutexGuard<'_, Vec<LifecycleEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A plugin that implements every capability and records its lifecycle.
///
/// Key manager calls store bytes verbatim; attestor calls return fixed
/// values derived from the plugin name.
pub struct MockPlugin {
    id: PluginId,
    log: Arc<CallLog>,
    fail_configure: bool,
    fail_shutdown: bool,
    key: RwLock<Option<Vec<u8>>>,
}

impl MockPlugin {
    pub fn new(kind: PluginKind, name: &str, log: Arc<CallLog>) -> Self {
        Self {
            id: PluginId::new(kind, name),
            log,
            fail_configure: false,
            fail_shutdown: false,
            key: RwLock::new(None),
        }
    }

    /// Make the configuration hook reject any configuration.
    pub fn failing_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    /// Make the shutdown hook report an error (after recording the call).
    pub fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    /// Record creation and wrap as an instance of the plugin's kind.
    pub fn into_instance(self) -> PluginInstance {
        self.log.record(LifecycleEvent::Created(self.id.clone()));
        match self.id.kind {
            PluginKind::KeyManager => PluginInstance::key_manager(self),
            PluginKind::NodeAttestor => PluginInstance::node_attestor(self),
            PluginKind::WorkloadAttestor => PluginInstance::workload_attestor(self),
        }
    }
}

#[async_trait]
impl PluginAdapter for MockPlugin {
    fn name(&self) -> &str {
        &self.id.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> PluginKind {
        self.id.kind
    }

    async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError> {
        if self.fail_configure {
            return Err(WardenError::Config(format!(
                "{} rejects its configuration",
                self.id.name
            )));
        }
        self.log
            .record(LifecycleEvent::Configured {
                id: self.id.clone(),
                configuration: request.configuration,
            });
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), WardenError> {
        self.log.record(LifecycleEvent::ShutDown(self.id.clone()));
        if self.fail_shutdown {
            return Err(WardenError::Internal(format!(
                "{} could not release resources",
                self.id.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyManager for MockPlugin {
    async fn generate_key_pair(&self) -> Result<KeyPair, WardenError> {
        Ok(KeyPair {
            public_key: self.id.name.as_bytes().to_vec(),
            private_key: self.id.name.as_bytes().iter().rev().copied().collect(),
        })
    }

    async fn store_private_key(&self, private_key: &[u8]) -> Result<(), WardenError> {
        *self.key.write().await = Some(private_key.to_vec());
        Ok(())
    }

    async fn fetch_private_key(&self) -> Result<Option<Vec<u8>>, WardenError> {
        Ok(self.key.read().await.clone())
    }
}

#[async_trait]
impl NodeAttestor for MockPlugin {
    async fn fetch_attestation_data(&self) -> Result<AttestationData, WardenError> {
        Ok(AttestationData {
            kind: self.id.name.clone(),
            payload: b"mock".to_vec(),
        })
    }
}

#[async_trait]
impl WorkloadAttestor for MockPlugin {
    async fn attest(&self, pid: u32) -> Result<Vec<Selector>, WardenError> {
        Ok(vec![Selector::new(self.id.name.clone(), format!("pid:{pid}"))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_lifecycle_in_order() {
        let log = CallLog::new();
        let instance = MockPlugin::new(PluginKind::KeyManager, "mock", log.clone())
            .into_instance();

        instance
            .configure(ConfigureRequest {
                configuration: "a = 1".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        instance.shutdown().await.unwrap();

        let id = PluginId::new(PluginKind::KeyManager, "mock");
        assert_eq!(
            log.events(),
            vec![
                LifecycleEvent::Created(id.clone()),
                LifecycleEvent::Configured {
                    id: id.clone(),
                    configuration: "a = 1".into()
                },
                LifecycleEvent::ShutDown(id),
            ]
        );
    }

    #[tokio::test]
    async fn failure_injection() {
        let log = CallLog::new();
        let instance = MockPlugin::new(PluginKind::WorkloadAttestor, "bad", log.clone())
            .failing_configure()
            .failing_shutdown()
            .into_instance();

        assert!(instance.configure(ConfigureRequest::default()).await.is_err());
        assert!(instance.shutdown().await.is_err());
        assert!(log.configured().is_empty());
        assert_eq!(log.shut_down().len(), 1);
    }

    #[tokio::test]
    async fn mock_key_manager_stores_bytes() {
        let plugin = MockPlugin::new(PluginKind::KeyManager, "km", CallLog::new());
        assert_eq!(plugin.fetch_private_key().await.unwrap(), None);
        plugin.store_private_key(b"key").await.unwrap();
        assert_eq!(plugin.fetch_private_key().await.unwrap(), Some(b"key".to_vec()));
    }
}
