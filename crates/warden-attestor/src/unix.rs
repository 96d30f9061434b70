// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unix workload attestor: selectors from a process's user and group ids.
//!
//! The real uid and gid come from the `Uid:` and `Gid:` lines of
//! `<proc_dir>/<pid>/status`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;
use warden_core::{
    ConfigureRequest, PluginAdapter, PluginInfo, PluginKind, Selector, WardenError,
    WorkloadAttestor,
};

const DEFAULT_PROC_DIR: &str = "/proc";

/// Attests workloads by the credentials of their process.
pub struct UnixAttestor {
    proc_dir: RwLock<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UnixSettings {
    proc_dir: Option<PathBuf>,
}

impl UnixAttestor {
    pub const NAME: &'static str = "unix";

    pub fn new() -> Self {
        Self {
            proc_dir: RwLock::new(PathBuf::from(DEFAULT_PROC_DIR)),
        }
    }
}

impl Default for UnixAttestor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for UnixAttestor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> PluginKind {
        PluginKind::WorkloadAttestor
    }

    async fn configure(&self, request: ConfigureRequest) -> Result<(), WardenError> {
        let settings: UnixSettings = toml::from_str(&request.configuration)
            .map_err(|e| WardenError::Config(format!("unix attestor: {}", e.message())))?;
        let proc_dir = settings
            .proc_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_DIR));
        debug!(proc_dir = %proc_dir.display(), "unix attestor configured");
        *self.proc_dir.write().await = proc_dir;
        Ok(())
    }

    async fn plugin_info(&self) -> Result<PluginInfo, WardenError> {
        Ok(PluginInfo {
            name: Self::NAME.to_string(),
            version: self.version(),
            description: "Selects workloads by unix uid and gid".to_string(),
        })
    }

    async fn shutdown(&self) -> Result<(), WardenError> {
        Ok(())
    }
}

#[async_trait]
impl WorkloadAttestor for UnixAttestor {
    async fn attest(&self, pid: u32) -> Result<Vec<Selector>, WardenError> {
        let path = self.proc_dir.read().await.join(pid.to_string()).join("status");
        let status = match tokio::fs::read_to_string(&path).await {
            Ok(status) => status,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WardenError::Attestation(format!("no process with pid {pid}")));
            }
            Err(e) => {
                return Err(WardenError::Attestation(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };

        let uid = real_id(&status, "Uid:").ok_or_else(|| malformed(pid, "Uid"))?;
        let gid = real_id(&status, "Gid:").ok_or_else(|| malformed(pid, "Gid"))?;
        Ok(vec![
            Selector::new(Self::NAME, format!("uid:{uid}")),
            Selector::new(Self::NAME, format!("gid:{gid}")),
        ])
    }
}

/// First numeric field of the line starting with `label` (the real id).
fn real_id(status: &str, label: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|field| field.parse().ok())
}

fn malformed(pid: u32, field: &str) -> WardenError {
    WardenError::Attestation(format!("process {pid} status has no valid {field} line"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_real_ids() {
        let status = "Name:\tsleep\nUid:\t1000\t1001\t1002\t1003\nGid:\t50\t51\t52\t53\n";
        assert_eq!(real_id(status, "Uid:"), Some(1000));
        assert_eq!(real_id(status, "Gid:"), Some(50));
        assert_eq!(real_id(status, "Groups:"), None);
        assert_eq!(real_id("Uid:\tabc\n", "Uid:"), None);
    }

    #[tokio::test]
    async fn rejects_unknown_settings() {
        let attestor = UnixAttestor::new();
        let err = attestor
            .configure(ConfigureRequest {
                configuration: "procdir = \"/x\"".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unix attestor"));
    }
}
