// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by plugin traits and the catalog.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Identifies the capability interface a catalog slot can hold.
///
/// Both the `KeyManager` and `key_manager` spellings parse to the same kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum PluginKind {
    #[strum(to_string = "KeyManager", serialize = "key_manager")]
    KeyManager,
    #[strum(to_string = "NodeAttestor", serialize = "node_attestor")]
    NodeAttestor,
    #[strum(to_string = "WorkloadAttestor", serialize = "workload_attestor")]
    WorkloadAttestor,
}

/// A plugin's identity: its kind plus implementation name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginId {
    pub kind: PluginKind,
    pub name: String,
}

impl PluginId {
    pub fn new(kind: PluginKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind, self.name)
    }
}

/// Configuration shared by every plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Trust domain the agent belongs to (e.g. `example.org`).
    pub trust_domain: String,
    /// Directory the agent and its plugins may persist state under.
    pub data_dir: PathBuf,
}

/// Arguments handed to a plugin's configuration hook.
#[derive(Debug, Clone, Default)]
pub struct ConfigureRequest {
    /// Implementation-specific configuration text (TOML for built-ins).
    pub configuration: String,
    /// Global configuration shared by all plugins.
    pub global: GlobalConfig,
}

/// Identity metadata returned by a plugin's info hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: semver::Version,
    pub description: String,
}

/// A freshly generated asymmetric key pair.
///
/// The private half is a PKCS#8 document; the public half is the
/// uncompressed SEC1 point.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub private_key: Vec<u8>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key.len())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Evidence a node attestor presents to prove the node's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationData {
    /// Attestation mechanism, e.g. `join_token`.
    pub kind: String,
    pub payload: Vec<u8>,
}

/// A workload property discovered by a workload attestor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    /// Attestor that produced the selector, e.g. `unix`.
    pub kind: String,
    /// Property value, e.g. `uid:1000`.
    pub value: String,
}

impl Selector {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}
