// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Warden agent.
//!
//! This crate provides the plugin capability traits, identity types and the
//! error taxonomy shared by the catalog and every plugin implementation.

pub mod error;
pub mod instance;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, ShutdownErrors, WardenError};
pub use instance::PluginInstance;
pub use types::{
    AttestationData, ConfigureRequest, GlobalConfig, KeyPair, PluginId, PluginInfo, PluginKind,
    Selector,
};

pub use traits::{HostService, KeyManager, NodeAttestor, PluginAdapter, WorkloadAttestor};

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use async_trait::async_trait;
    use strum::IntoEnumIterator;

    use super::*;

    struct StaticAttestor;

    #[async_trait]
    impl PluginAdapter for StaticAttestor {
        fn name(&self) -> &str {
            "static"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(1, 2, 3)
        }

        fn kind(&self) -> PluginKind {
            PluginKind::WorkloadAttestor
        }

        async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError> {
            if request.configuration.is_empty() {
                Ok(())
            } else {
                Err(WardenError::Config("no settings accepted".into()))
            }
        }

        async fn shutdown(&self) -> Result<(), WardenError> {
            Ok(())
        }
    }

    #[async_trait]
    impl WorkloadAttestor for StaticAttestor {
        async fn attest(&self, pid: u32) -> Result<Vec<Selector>, WardenError> {
            Ok(vec![Selector::new("static", format!("pid:{pid}"))])
        }
    }

    #[test]
    fn plugin_kind_display_and_parse() {
        for kind in PluginKind::iter() {
            let parsed = PluginKind::from_str(&kind.to_string()).expect("should parse back");
            assert_eq!(kind, parsed);
        }
        assert_eq!(PluginKind::iter().count(), 3);
    }

    #[test]
    fn plugin_kind_accepts_snake_case_alias() {
        assert_eq!(
            PluginKind::from_str("key_manager").unwrap(),
            PluginKind::KeyManager
        );
        assert_eq!(
            PluginKind::from_str("workload_attestor").unwrap(),
            PluginKind::WorkloadAttestor
        );
        assert!(PluginKind::from_str("Keymanager").is_err());
    }

    #[test]
    fn plugin_kind_serialization() {
        let json = serde_json::to_string(&PluginKind::NodeAttestor).unwrap();
        let parsed: PluginKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PluginKind::NodeAttestor);
    }

    #[test]
    fn plugin_id_display_quotes_name() {
        let id = PluginId::new(PluginKind::KeyManager, "memory");
        assert_eq!(id.to_string(), "KeyManager \"memory\"");
    }

    #[test]
    fn key_pair_debug_redacts_private_key() {
        let pair = KeyPair {
            public_key: vec![4; 65],
            private_key: vec![7; 138],
        };
        let debug = format!("{pair:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("7, 7"));
    }

    #[test]
    fn selector_display() {
        assert_eq!(Selector::new("unix", "uid:0").to_string(), "unix:uid:0");
    }

    #[tokio::test]
    async fn instance_dispatches_to_plugin() {
        let instance = PluginInstance::workload_attestor(StaticAttestor);
        assert_eq!(instance.kind(), PluginKind::WorkloadAttestor);
        assert_eq!(instance.name(), "static");
        assert!(instance.as_key_manager().is_none());

        instance.configure(ConfigureRequest::default()).await.unwrap();
        let err = instance
            .configure(ConfigureRequest {
                configuration: "x = 1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WardenError::Config(_)));

        let info = instance.plugin_info().await.unwrap();
        assert_eq!(info.name, "static");
        assert_eq!(info.version, semver::Version::new(1, 2, 3));

        let attestor = instance.as_workload_attestor().unwrap();
        let selectors = attestor.attest(42).await.unwrap();
        assert_eq!(selectors, vec![Selector::new("static", "pid:42")]);
    }

    #[test]
    fn instance_clones_share_identity() {
        let instance = PluginInstance::workload_attestor(StaticAttestor);
        let clone = instance.clone();
        let (a, b) = (
            instance.as_workload_attestor().unwrap(),
            clone.as_workload_attestor().unwrap(),
        );
        assert!(Arc::ptr_eq(a, b));
    }
}
