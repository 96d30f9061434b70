// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Warden agent.
//!
//! Every catalog failure is attributable to the plugin kind or the
//! `(kind, name)` pair it concerns, so operators can tell which plugin
//! misbehaved without reading logs.

use std::fmt;

use thiserror::Error;

use crate::types::{PluginId, PluginKind};

/// Boxed error source carried by instantiation and configure failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across plugin traits and catalog operations.
#[derive(Debug, Error)]
pub enum WardenError {
    /// General configuration errors (unknown kind, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A configured implementation name matches no built-in or external descriptor.
    #[error(
        "unknown plugin {id}{}",
        .suggestion.as_deref().map(|s| format!(" (did you mean `{s}`?)")).unwrap_or_default()
    )]
    UnknownPlugin {
        id: PluginId,
        suggestion: Option<String>,
    },

    /// The same `(kind, name)` pair was declared more than once.
    #[error("plugin {id} is declared more than once")]
    DuplicatePlugin { id: PluginId },

    /// A plugin's configuration blob could not be interpreted.
    #[error("malformed plugin_data for {id}: {reason}")]
    MalformedPluginData { id: PluginId, reason: String },

    /// An exactly-one slot found no enabled plugin of its kind.
    #[error("no {kind} plugin configured; exactly one is required")]
    MissingPlugin { kind: PluginKind },

    /// An exactly-one slot found more than one enabled plugin of its kind.
    #[error(
        "expected exactly one {kind} plugin, found {}: {}",
        .names.len(),
        .names.join(", ")
    )]
    AmbiguousPlugin { kind: PluginKind, names: Vec<String> },

    /// A collection slot found fewer enabled plugins than its minimum.
    #[error("expected at least {min} {kind} plugin(s), found {found}")]
    InsufficientPlugins {
        kind: PluginKind,
        min: usize,
        found: usize,
    },

    /// The factory or external loader failed to produce a live instance.
    #[error("failed to instantiate plugin {id}: {source}")]
    Instantiate { id: PluginId, source: BoxError },

    /// A plugin rejected its configuration.
    #[error("failed to configure plugin {id}: {source}")]
    Configure { id: PluginId, source: BoxError },

    /// One or more plugins failed to release their resources.
    #[error(transparent)]
    Shutdown(ShutdownErrors),

    /// Key manager failures (bad key encoding, randomness, persistence).
    #[error("key manager error: {0}")]
    KeyManager(String),

    /// Node or workload attestation failures.
    #[error("attestation error: {0}")]
    Attestation(String),

    /// Filesystem errors raised by plugins that persist state.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Every shutdown failure collected while closing a set of plugins.
#[derive(Debug, Default)]
pub struct ShutdownErrors {
    failures: Vec<(PluginId, WardenError)>,
}

impl ShutdownErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed shutdown for `id`.
    pub fn push(&mut self, id: PluginId, err: WardenError) {
        self.failures.push((id, err));
    }

    /// The failing plugins, in the order they were closed.
    pub fn failures(&self) -> &[(PluginId, WardenError)] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Ok(())` when nothing failed, otherwise the aggregate error.
    pub fn into_result(self) -> Result<(), WardenError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(WardenError::Shutdown(self))
        }
    }
}

impl fmt::Display for ShutdownErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to shut down {} plugin(s)", self.failures.len())?;
        for (i, (id, err)) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{id}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShutdownErrors {}
